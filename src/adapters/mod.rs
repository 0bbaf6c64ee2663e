//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - Session validation (JWT, mock)
//! - `clock` - System and fixed clocks
//! - `gateway` - Payment gateway clients (HTTP, mock)
//! - `http` - axum REST surface
//! - `memory` - In-memory persistence for every repository port
//! - `postgres` - PostgreSQL persistence
//! - `scheduler` - Periodic expiry reconciliation

pub mod auth;
pub mod clock;
pub mod gateway;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod scheduler;

pub use auth::{JwtSessionValidator, MockSessionValidator};
pub use clock::{FixedClock, SystemClock};
pub use gateway::{HttpGatewayConfig, HttpPaymentGateway, MockPaymentGateway};
pub use memory::InMemoryStore;
pub use scheduler::{ReconcileScheduler, ReconcileSchedulerConfig};
