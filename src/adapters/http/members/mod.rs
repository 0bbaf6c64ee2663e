//! HTTP adapter for member endpoints.
//!
//! - `GET|POST /api/members`
//! - `GET /api/members/expiring`
//! - `GET|PATCH|DELETE /api/members/:id`
//! - `GET /api/members/:id/payments`

pub mod dto;
mod handlers;
mod routes;

pub use routes::member_routes;
