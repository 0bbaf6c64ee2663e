//! HTTP handlers for payment endpoints.

use axum::extract::State;
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::payment::{
    CreateGatewayOrderCommand, RecordPaymentCommand, VerifyGatewayPaymentCommand,
};
use crate::domain::access::Operation;

use super::super::error::ApiError;
use super::super::extract::ApiJson;
use super::super::middleware::OptionalAuth;
use super::super::state::AppState;
use super::dto::{CreateOrderRequest, PaymentRecordedResponse, RecordPaymentRequest, VerifyPaymentRequest};

/// GET /api/payments
pub async fn list_payments(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<impl IntoResponse, ApiError> {
    state.authorize(user.as_ref(), Operation::ListPayments).await?;
    let payments = state.list_payments_handler().handle().await?;
    Ok(Json(payments))
}

/// POST /api/payments
pub async fn record_payment(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    ApiJson(request): ApiJson<RecordPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.authorize(user.as_ref(), Operation::RecordPayment).await?;
    let cmd = RecordPaymentCommand::try_from(request)?;
    let result = state.record_payment_handler().handle(cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(PaymentRecordedResponse::new(result, state.now())),
    ))
}

/// POST /api/payments/gateway/order
pub async fn create_gateway_order(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    ApiJson(request): ApiJson<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.authorize(user.as_ref(), Operation::CreateGatewayOrder).await?;
    let cmd = CreateGatewayOrderCommand::try_from(request)?;
    let order = state.create_order_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// POST /api/payments/gateway/verify
pub async fn verify_gateway_payment(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    ApiJson(request): ApiJson<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.authorize(user.as_ref(), Operation::VerifyGatewayPayment).await?;
    let cmd = VerifyGatewayPaymentCommand::try_from(request)?;
    let result = state.verify_payment_handler().handle(cmd).await?;
    Ok(Json(PaymentRecordedResponse::new(result, state.now())))
}
