//! HTTP adapter for the payment ledger and gateway checkout.
//!
//! - `GET|POST /api/payments`
//! - `POST /api/payments/gateway/order`
//! - `POST /api/payments/gateway/verify`

pub mod dto;
mod handlers;
mod routes;

pub use routes::payment_routes;
