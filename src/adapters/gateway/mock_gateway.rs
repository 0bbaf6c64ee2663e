//! Mock payment gateway.
//!
//! Used when no gateway credentials are configured and by tests. Orders are
//! numbered `order_mock_1`, `order_mock_2`, ... and every request is kept for
//! assertions.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{GatewayError, GatewayOrder, OrderRequest, PaymentGateway};

/// Signing secret paired with the mock gateway when no real key is configured.
pub const MOCK_SIGNING_SECRET: &str = "mock_gateway_secret";

#[derive(Default)]
pub struct MockPaymentGateway {
    state: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    requests: Vec<OrderRequest>,
    next_error: Option<GatewayError>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the next call with `error`.
    pub fn fail_next(&self, error: GatewayError) {
        if let Ok(mut state) = self.state.lock() {
            state.next_error = Some(error);
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<OrderRequest> {
        self.state.lock().map(|s| s.requests.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_order(&self, request: &OrderRequest) -> Result<GatewayOrder, GatewayError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| GatewayError::network("mock gateway poisoned"))?;
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }
        state.requests.push(request.clone());

        Ok(GatewayOrder {
            order_id: format!("order_mock_{}", state.requests.len()),
            amount: request.amount,
            currency: request.currency.clone(),
            receipt: request.receipt.clone(),
        })
    }
}
