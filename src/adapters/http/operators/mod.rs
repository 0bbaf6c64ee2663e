//! HTTP adapter for operator identity.
//!
//! - `POST /api/auth/sync` - create or return the caller's operator record
//! - `GET /api/auth/me` - the caller's operator record

use axum::extract::{Json, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;

use super::error::ApiError;
use super::middleware::RequireAuth;
use super::state::AppState;

/// POST /api/auth/sync
pub async fn sync_operator(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let operator = state.sync_operator_handler().handle(&user).await?;
    Ok(Json(operator))
}

/// GET /api/auth/me
pub async fn current_operator(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let operator = state.current_operator_handler().handle(&user).await?;
    Ok(Json(operator))
}

pub fn operator_routes() -> Router<AppState> {
    Router::new()
        .route("/sync", post(sync_operator))
        .route("/me", get(current_operator))
}
