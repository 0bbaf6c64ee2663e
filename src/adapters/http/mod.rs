//! HTTP adapter - the axum REST surface.
//!
//! Every route resolves its caller through the bearer-token middleware and
//! then asks [`AppState::authorize`] whether the operation is allowed.

pub mod error;
pub mod extract;
pub mod members;
pub mod middleware;
pub mod operators;
pub mod payments;
pub mod plans;
pub mod reconcile;
pub mod router;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use router::{api_routes, app_router, cors_layer, health};
pub use state::AppState;
