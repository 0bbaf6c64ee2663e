//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `MemberRepository` - Members, with versioned compare-and-swap writes
//! - `PlanRepository` - Plan catalogue
//! - `PaymentLedger` - Append-only payments, atomic with member renewal
//! - `OperatorDirectory` - Back-office operators by identity subject
//!
//! ## Other Ports
//!
//! - `Clock` - Current time
//! - `PaymentGateway` - Checkout order creation
//! - `SessionValidator` - Bearer token validation

mod clock;
mod member_repository;
mod operator_directory;
mod payment_gateway;
mod payment_ledger;
mod plan_repository;
mod session_validator;

pub use clock::Clock;
pub use member_repository::MemberRepository;
pub use operator_directory::OperatorDirectory;
pub use payment_gateway::{GatewayError, GatewayErrorCode, GatewayOrder, OrderRequest, PaymentGateway};
pub use payment_ledger::PaymentLedger;
pub use plan_repository::PlanRepository;
pub use session_validator::SessionValidator;
