//! Payment handlers - ledger writes, gateway checkout and ledger queries.

mod create_gateway_order;
mod list_payments;
mod record_payment;
mod verify_gateway_payment;

pub use create_gateway_order::{CreateGatewayOrderCommand, CreateGatewayOrderHandler};
pub use list_payments::{ListPaymentsHandler, MemberPaymentHistoryHandler, MemberPaymentHistoryQuery};
pub use record_payment::{RecordPaymentCommand, RecordPaymentHandler, RecordPaymentResult};
pub use verify_gateway_payment::{VerifyGatewayPaymentCommand, VerifyGatewayPaymentHandler};
