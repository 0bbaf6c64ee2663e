//! Router for plan endpoints, mounted at `/api/plans`.

use axum::routing::{get, patch};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{create_plan, deactivate_plan, list_active_plans, list_all_plans, update_plan};

pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_active_plans).post(create_plan))
        .route("/all", get(list_all_plans))
        .route("/:id", patch(update_plan).delete(deactivate_plan))
}
