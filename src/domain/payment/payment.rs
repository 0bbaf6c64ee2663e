//! Payment ledger entry.
//!
//! Payments are immutable facts. They are appended to the ledger once and
//! never rewritten; a `Paid` entry is the only thing that renews a member.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::{MemberId, Money, PaymentId, PlanId, Timestamp, ValidationError};

/// Outcome of a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Overdue => "overdue",
        }
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Paid
    }
}

impl FromStr for PaymentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "paid" => Ok(PaymentStatus::Paid),
            "pending" => Ok(PaymentStatus::Pending),
            "overdue" => Ok(PaymentStatus::Overdue),
            _ => Err(ValidationError::invalid_format(
                "status",
                format!("unknown payment status '{}'", s),
            )),
        }
    }
}

/// How the payment was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Entered by staff at the desk.
    Manual,
    /// Confirmed through the payment gateway.
    Gateway,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Manual => "manual",
            PaymentMethod::Gateway => "gateway",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Manual
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(PaymentMethod::Manual),
            "gateway" => Ok(PaymentMethod::Gateway),
            _ => Err(ValidationError::invalid_format(
                "payment_method",
                format!("unknown payment method '{}'", s),
            )),
        }
    }
}

/// Gateway identifiers attached to a verified payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayReference {
    pub order_id: String,
    pub payment_id: String,
}

/// Input for a new ledger entry.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub member_id: MemberId,
    pub plan_id: PlanId,
    pub amount: Money,
    pub status: PaymentStatus,
    pub method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub gateway: Option<GatewayReference>,
}

/// A recorded payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub member_id: MemberId,
    pub plan_id: PlanId,
    pub amount: Money,
    pub status: PaymentStatus,
    pub payment_date: Timestamp,
    /// External transaction identifier; unique across the ledger when present.
    pub transaction_id: Option<String>,
    pub method: PaymentMethod,
    pub gateway: Option<GatewayReference>,
}

impl Payment {
    /// Builds the ledger entry for `input`, dated `now`.
    ///
    /// A blank transaction id is treated as absent.
    pub fn record(id: PaymentId, input: NewPayment, now: Timestamp) -> Result<Self, ValidationError> {
        let transaction_id = input
            .transaction_id
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        if input.method == PaymentMethod::Gateway && input.gateway.is_none() {
            return Err(ValidationError::empty_field("gateway"));
        }

        Ok(Self {
            id,
            member_id: input.member_id,
            plan_id: input.plan_id,
            amount: input.amount,
            status: input.status,
            payment_date: now,
            transaction_id,
            method: input.method,
            gateway: input.gateway,
        })
    }

    /// Whether recording this payment renews the member's subscription.
    pub fn renews_subscription(&self) -> bool {
        self.status == PaymentStatus::Paid
    }
}
