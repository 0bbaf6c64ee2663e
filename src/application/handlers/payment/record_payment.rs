//! RecordPaymentHandler - Command handler for appending to the payment ledger.
//!
//! A `Paid` payment renews the member in the same atomic ledger write.
//! Pending and Overdue payments are recorded without touching the member.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::foundation::{ErrorCode, MemberId, Money, PaymentId, PlanId};
use crate::domain::membership::{Member, MembershipError, RenewalPolicy};
use crate::domain::payment::{GatewayReference, NewPayment, Payment, PaymentMethod, PaymentStatus};
use crate::ports::{Clock, MemberRepository, PaymentLedger, PlanRepository};

use crate::application::handlers::MAX_WRITE_ATTEMPTS;

/// Command to record a payment.
#[derive(Debug, Clone)]
pub struct RecordPaymentCommand {
    pub member_id: MemberId,
    pub plan_id: PlanId,
    /// Defaults to the plan's price.
    pub amount: Option<Money>,
    pub status: PaymentStatus,
    pub method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub gateway: Option<GatewayReference>,
}

/// Result of a recorded payment.
#[derive(Debug, Clone)]
pub struct RecordPaymentResult {
    pub payment: Payment,
    /// Member after the payment; renewed when the payment was Paid.
    pub member: Member,
}

/// Handler for recording payments.
pub struct RecordPaymentHandler {
    members: Arc<dyn MemberRepository>,
    plans: Arc<dyn PlanRepository>,
    ledger: Arc<dyn PaymentLedger>,
    clock: Arc<dyn Clock>,
    renewal: Arc<dyn RenewalPolicy>,
}

impl RecordPaymentHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        plans: Arc<dyn PlanRepository>,
        ledger: Arc<dyn PaymentLedger>,
        clock: Arc<dyn Clock>,
        renewal: Arc<dyn RenewalPolicy>,
    ) -> Self {
        Self {
            members,
            plans,
            ledger,
            clock,
            renewal,
        }
    }

    pub async fn handle(&self, cmd: RecordPaymentCommand) -> Result<RecordPaymentResult, MembershipError> {
        let plan = self
            .plans
            .find_by_id(&cmd.plan_id)
            .await?
            .ok_or(MembershipError::PlanNotFound(cmd.plan_id))?;

        if let Some(txn) = cmd.transaction_id.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            if self.ledger.find_by_transaction_id(txn).await?.is_some() {
                return Err(MembershipError::duplicate_transaction(txn));
            }
        }

        let now = self.clock.now();
        let payment = Payment::record(
            PaymentId::new(),
            NewPayment {
                member_id: cmd.member_id,
                plan_id: plan.id,
                amount: cmd.amount.unwrap_or(plan.price),
                status: cmd.status,
                method: cmd.method,
                transaction_id: cmd.transaction_id,
                gateway: cmd.gateway,
            },
            now,
        )?;

        let mut attempt = 1;
        loop {
            let member = self
                .members
                .find_by_id(&cmd.member_id)
                .await?
                .ok_or(MembershipError::MemberNotFound(cmd.member_id))?;

            let renewed = if payment.renews_subscription() {
                let mut renewed = member.clone();
                renewed.apply_paid_payment(&plan, now, self.renewal.as_ref())?;
                Some(renewed)
            } else {
                None
            };

            match self.ledger.append(&payment, renewed.as_ref()).await {
                Ok(stored) => {
                    let member = stored.unwrap_or(member);
                    info!(
                        payment_id = %payment.id,
                        member_id = %member.id,
                        status = payment.status.as_str(),
                        method = payment.method.as_str(),
                        amount_cents = payment.amount.cents(),
                        "Payment recorded"
                    );
                    return Ok(RecordPaymentResult { payment, member });
                }
                Err(e) if e.code == ErrorCode::ConcurrencyConflict && attempt < MAX_WRITE_ATTEMPTS => {
                    debug!(member_id = %cmd.member_id, attempt, "Payment renewal lost a race, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
