//! Payment gateway adapters.

mod http_gateway;
mod mock_gateway;

pub use http_gateway::{HttpGatewayConfig, HttpPaymentGateway, DEFAULT_GATEWAY_BASE_URL};
pub use mock_gateway::{MockPaymentGateway, MOCK_SIGNING_SECRET};
