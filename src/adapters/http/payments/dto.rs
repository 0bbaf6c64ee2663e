//! Request and response bodies for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::payment::{
    CreateGatewayOrderCommand, RecordPaymentCommand, RecordPaymentResult, VerifyGatewayPaymentCommand,
};
use crate::application::handlers::membership::MemberView;
use crate::domain::foundation::{MemberId, Money, PlanId, Timestamp, ValidationError};
use crate::domain::payment::{Payment, PaymentMethod, PaymentStatus};

fn optional_amount(cents: Option<i64>) -> Result<Option<Money>, ValidationError> {
    cents.map(Money::from_cents).transpose()
}

/// POST /api/payments - a desk-entered payment.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPaymentRequest {
    pub member_id: MemberId,
    pub plan_id: PlanId,
    /// Cents; defaults to the plan price.
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

impl TryFrom<RecordPaymentRequest> for RecordPaymentCommand {
    type Error = ValidationError;

    fn try_from(req: RecordPaymentRequest) -> Result<Self, Self::Error> {
        Ok(RecordPaymentCommand {
            member_id: req.member_id,
            plan_id: req.plan_id,
            amount: optional_amount(req.amount)?,
            status: req.status,
            method: PaymentMethod::Manual,
            transaction_id: req.transaction_id,
            gateway: None,
        })
    }
}

/// POST /api/payments/gateway/order
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    /// Cents.
    pub amount: i64,
    #[serde(default)]
    pub currency: Option<String>,
}

impl TryFrom<CreateOrderRequest> for CreateGatewayOrderCommand {
    type Error = ValidationError;

    fn try_from(req: CreateOrderRequest) -> Result<Self, Self::Error> {
        Ok(CreateGatewayOrderCommand {
            amount: Money::from_cents(req.amount)?,
            currency: req.currency,
        })
    }
}

/// POST /api/payments/gateway/verify
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentRequest {
    pub member_id: MemberId,
    pub plan_id: PlanId,
    #[serde(default)]
    pub amount: Option<i64>,
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

impl TryFrom<VerifyPaymentRequest> for VerifyGatewayPaymentCommand {
    type Error = ValidationError;

    fn try_from(req: VerifyPaymentRequest) -> Result<Self, Self::Error> {
        Ok(VerifyGatewayPaymentCommand {
            member_id: req.member_id,
            plan_id: req.plan_id,
            amount: optional_amount(req.amount)?,
            order_id: req.order_id,
            payment_id: req.payment_id,
            signature: req.signature,
        })
    }
}

/// A recorded payment together with the member it touched.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRecordedResponse {
    pub payment: Payment,
    pub member: MemberView,
}

impl PaymentRecordedResponse {
    pub fn new(result: RecordPaymentResult, now: Timestamp) -> Self {
        Self {
            payment: result.payment,
            member: MemberView::at(result.member, now),
        }
    }
}
