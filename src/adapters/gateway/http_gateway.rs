//! Hosted-checkout gateway adapter.
//!
//! Creates orders via `POST {base}/v1/orders` with HTTP basic auth
//! (`key_id:key_secret`). Amounts travel in minor units.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpGatewayConfig::new(key_id, key_secret)
//!     .with_base_url("https://api.gateway.example");
//! let gateway = HttpPaymentGateway::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Money;
use crate::ports::{GatewayError, GatewayOrder, OrderRequest, PaymentGateway};

pub const DEFAULT_GATEWAY_BASE_URL: &str = "https://api.razorpay.com";

/// Gateway API credentials and endpoint.
#[derive(Clone)]
pub struct HttpGatewayConfig {
    key_id: String,
    key_secret: Secret<String>,
    api_base_url: String,
    timeout: Duration,
}

impl HttpGatewayConfig {
    pub fn new(key_id: impl Into<String>, key_secret: Secret<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret,
            api_base_url: DEFAULT_GATEWAY_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn orders_url(&self) -> String {
        format!("{}/v1/orders", self.api_base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
    amount: i64,
    currency: String,
    #[serde(default)]
    receipt: Option<String>,
}

pub struct HttpPaymentGateway {
    config: HttpGatewayConfig,
    http_client: reqwest::Client,
}

impl HttpPaymentGateway {
    pub fn new(config: HttpGatewayConfig) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { config, http_client })
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_order(&self, request: &OrderRequest) -> Result<GatewayOrder, GatewayError> {
        let body = CreateOrderBody {
            amount: request.amount.cents(),
            currency: &request.currency,
            receipt: &request.receipt,
        };

        let response = self
            .http_client
            .post(self.config.orders_url())
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.expose_secret()))
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(GatewayError::authentication("gateway rejected credentials"));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(%status, error = %error_text, "Gateway create_order failed");
            return Err(GatewayError::rejected(format!("gateway returned {}: {}", status, error_text)));
        }

        let order: OrderResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::rejected(format!("failed to parse gateway response: {}", e)))?;

        Ok(GatewayOrder {
            order_id: order.id,
            amount: Money::from_cents(order.amount)
                .map_err(|_| GatewayError::rejected("gateway returned a negative amount"))?,
            currency: order.currency,
            receipt: order.receipt.unwrap_or_else(|| request.receipt.clone()),
        })
    }
}

impl std::fmt::Debug for HttpPaymentGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPaymentGateway")
            .field("key_id", &self.config.key_id)
            .field("api_base_url", &self.config.api_base_url)
            .finish_non_exhaustive()
    }
}
