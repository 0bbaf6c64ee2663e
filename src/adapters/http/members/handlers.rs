//! HTTP handlers for member endpoints.

use axum::extract::State;
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::membership::{DeleteMemberCommand, GetMemberQuery, MemberView};
use crate::application::handlers::payment::MemberPaymentHistoryQuery;
use crate::domain::access::Operation;
use crate::domain::foundation::MemberId;

use super::super::error::ApiError;
use super::super::extract::{ApiJson, ApiPath, ApiQuery};
use super::super::middleware::OptionalAuth;
use super::super::state::AppState;
use super::dto::{EditMemberRequest, ExpiringParams, RegisterMemberRequest};

/// GET /api/members
pub async fn list_members(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<impl IntoResponse, ApiError> {
    state.authorize(user.as_ref(), Operation::ListMembers).await?;
    let members = state.list_members_handler().handle().await?;
    Ok(Json(members))
}

/// POST /api/members
pub async fn register_member(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    ApiJson(request): ApiJson<RegisterMemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.authorize(user.as_ref(), Operation::RegisterMember).await?;
    let member = state.register_member_handler().handle(request.into()).await?;
    let view = MemberView::at(member, state.now());
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/members/expiring
pub async fn list_expiring(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    ApiQuery(params): ApiQuery<ExpiringParams>,
) -> Result<impl IntoResponse, ApiError> {
    state.authorize(user.as_ref(), Operation::ListExpiringMembers).await?;
    let members = state.list_expiring_handler().handle(params.into()).await?;
    Ok(Json(members))
}

/// GET /api/members/:id
pub async fn get_member(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    ApiPath(member_id): ApiPath<MemberId>,
) -> Result<impl IntoResponse, ApiError> {
    state.authorize(user.as_ref(), Operation::ViewMember).await?;
    let view = state.get_member_handler().handle(GetMemberQuery { member_id }).await?;
    Ok(Json(view))
}

/// PATCH /api/members/:id
pub async fn edit_member(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    ApiPath(member_id): ApiPath<MemberId>,
    ApiJson(request): ApiJson<EditMemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.authorize(user.as_ref(), Operation::EditMember).await?;
    let member = state
        .edit_member_handler()
        .handle(request.into_command(member_id))
        .await?;
    Ok(Json(MemberView::at(member, state.now())))
}

/// DELETE /api/members/:id
pub async fn delete_member(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    ApiPath(member_id): ApiPath<MemberId>,
) -> Result<impl IntoResponse, ApiError> {
    state.authorize(user.as_ref(), Operation::DeleteMember).await?;
    state
        .delete_member_handler()
        .handle(DeleteMemberCommand { member_id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/members/:id/payments
pub async fn member_payments(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    ApiPath(member_id): ApiPath<MemberId>,
) -> Result<impl IntoResponse, ApiError> {
    state.authorize(user.as_ref(), Operation::ViewMemberPayments).await?;
    let payments = state
        .member_payments_handler()
        .handle(MemberPaymentHistoryQuery { member_id })
        .await?;
    Ok(Json(payments))
}
