//! HTTP handlers for plan endpoints.

use axum::extract::State;
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::plan::{
    CreatePlanCommand, DeactivatePlanCommand, ListPlansQuery, UpdatePlanCommand,
};
use crate::domain::access::Operation;
use crate::domain::foundation::PlanId;
use crate::domain::membership::PlanChanges;

use super::super::error::ApiError;
use super::super::extract::{ApiJson, ApiPath};
use super::super::middleware::OptionalAuth;
use super::super::state::AppState;
use super::dto::{CreatePlanRequest, UpdatePlanRequest};

/// GET /api/plans - active plans, open to anyone.
pub async fn list_active_plans(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<impl IntoResponse, ApiError> {
    state.authorize(user.as_ref(), Operation::ListAssignablePlans).await?;
    let plans = state.list_plans_handler().handle(ListPlansQuery::default()).await?;
    Ok(Json(plans))
}

/// GET /api/plans/all - includes deactivated plans.
pub async fn list_all_plans(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<impl IntoResponse, ApiError> {
    state.authorize(user.as_ref(), Operation::ListAllPlans).await?;
    let plans = state
        .list_plans_handler()
        .handle(ListPlansQuery { include_inactive: true })
        .await?;
    Ok(Json(plans))
}

/// POST /api/plans
pub async fn create_plan(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    ApiJson(request): ApiJson<CreatePlanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.authorize(user.as_ref(), Operation::CreatePlan).await?;
    let cmd = CreatePlanCommand::try_from(request)?;
    let plan = state.create_plan_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// PATCH /api/plans/:id
pub async fn update_plan(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    ApiPath(plan_id): ApiPath<PlanId>,
    ApiJson(request): ApiJson<UpdatePlanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.authorize(user.as_ref(), Operation::UpdatePlan).await?;
    let changes = PlanChanges::try_from(request)?;
    let plan = state
        .update_plan_handler()
        .handle(UpdatePlanCommand { plan_id, changes })
        .await?;
    Ok(Json(plan))
}

/// DELETE /api/plans/:id - soft delete.
pub async fn deactivate_plan(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    ApiPath(plan_id): ApiPath<PlanId>,
) -> Result<impl IntoResponse, ApiError> {
    state.authorize(user.as_ref(), Operation::DeactivatePlan).await?;
    let plan = state
        .deactivate_plan_handler()
        .handle(DeactivatePlanCommand { plan_id })
        .await?;
    Ok(Json(plan))
}
