//! HTTP middleware for axum.
//!
//! - `auth` - Bearer token validation and caller extractors

pub mod auth;

pub use auth::{auth_middleware, AuthRejection, AuthState, OptionalAuth, RequireAuth};
