//! Router for member endpoints, mounted at `/api/members`.

use axum::routing::get;
use axum::Router;

use super::super::state::AppState;
use super::handlers::{
    delete_member, edit_member, get_member, list_expiring, list_members, member_payments,
    register_member,
};

pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_members).post(register_member))
        .route("/expiring", get(list_expiring))
        .route("/:id", get(get_member).patch(edit_member).delete(delete_member))
        .route("/:id/payments", get(member_payments))
}
