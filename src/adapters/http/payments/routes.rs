//! Router for payment endpoints, mounted at `/api/payments`.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{create_gateway_order, list_payments, record_payment, verify_gateway_payment};

pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(record_payment))
        .route("/gateway/order", post(create_gateway_order))
        .route("/gateway/verify", post(verify_gateway_payment))
}
