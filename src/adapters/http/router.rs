//! Top-level axum router.

use axum::http::{header, HeaderValue, Method};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{middleware, Json, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::members::member_routes;
use super::middleware::{auth_middleware, AuthState};
use super::operators::operator_routes;
use super::payments::payment_routes;
use super::plans::plan_routes;
use super::reconcile::reconcile_routes;
use super::state::AppState;

/// GET / - liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "memberdesk"
    }))
}

/// Routes under `/api`, without middleware.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", operator_routes())
        .nest("/members", member_routes())
        .nest("/plans", plan_routes())
        .nest("/payments", payment_routes())
        .nest("/reconcile", reconcile_routes())
}

/// Builds the CORS layer. An empty origin list allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(allowed))
    }
}

/// The full application: health, API, bearer authentication, CORS and tracing.
pub fn app_router(state: AppState, validator: AuthState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(health))
        .nest("/api", api_routes())
        .layer(middleware::from_fn_with_state(validator, auth_middleware))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
