//! Manual reconciler trigger: `POST /api/reconcile` (admin).

use axum::extract::{Json, State};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use tracing::info;

use crate::domain::access::Operation;

use super::error::ApiError;
use super::middleware::OptionalAuth;
use super::state::AppState;

/// POST /api/reconcile
pub async fn run_reconciler(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<impl IntoResponse, ApiError> {
    let operator = state.authorize(user.as_ref(), Operation::RunReconciler).await?;
    if let Some(operator) = &operator {
        info!(operator_id = %operator.id, "Manual reconcile requested");
    }
    let report = state.reconciler().handle().await?;
    Ok(Json(report))
}

pub fn reconcile_routes() -> Router<AppState> {
    Router::new().route("/", post(run_reconciler))
}
