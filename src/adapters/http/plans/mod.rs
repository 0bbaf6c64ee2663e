//! HTTP adapter for the plan catalogue.
//!
//! - `GET /api/plans` - active plans (public)
//! - `POST /api/plans` - create (admin)
//! - `GET /api/plans/all` - every plan
//! - `PATCH|DELETE /api/plans/:id` - update / deactivate (admin)

pub mod dto;
mod handlers;
mod routes;

pub use routes::plan_routes;
