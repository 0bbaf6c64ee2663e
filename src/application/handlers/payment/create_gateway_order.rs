//! CreateGatewayOrderHandler - Opens a checkout order with the payment gateway.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::Money;
use crate::domain::membership::MembershipError;
use crate::ports::{Clock, GatewayOrder, OrderRequest, PaymentGateway};

/// Command to open a gateway order.
#[derive(Debug, Clone)]
pub struct CreateGatewayOrderCommand {
    pub amount: Money,
    /// Falls back to the configured default currency.
    pub currency: Option<String>,
}

/// Handler for gateway order creation.
pub struct CreateGatewayOrderHandler {
    gateway: Arc<dyn PaymentGateway>,
    clock: Arc<dyn Clock>,
    default_currency: String,
}

impl CreateGatewayOrderHandler {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        clock: Arc<dyn Clock>,
        default_currency: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            clock,
            default_currency: default_currency.into(),
        }
    }

    pub async fn handle(&self, cmd: CreateGatewayOrderCommand) -> Result<GatewayOrder, MembershipError> {
        if cmd.amount == Money::ZERO {
            return Err(MembershipError::validation("amount", "amount must be greater than zero"));
        }

        let currency = cmd
            .currency
            .map(|c| c.trim().to_ascii_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| self.default_currency.clone());

        let request = OrderRequest {
            amount: cmd.amount,
            currency,
            receipt: format!("receipt_{}", self.clock.now().as_unix_millis()),
        };

        let order = self.gateway.create_order(&request).await.map_err(|e| {
            warn!(error = %e, receipt = %request.receipt, "Gateway order creation failed");
            MembershipError::gateway(e.message)
        })?;

        info!(
            order_id = %order.order_id,
            amount_cents = order.amount.cents(),
            currency = %order.currency,
            "Gateway order created"
        );
        Ok(order)
    }
}
