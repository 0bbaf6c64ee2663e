//! VerifyGatewayPaymentHandler - Accepts a gateway checkout confirmation.
//!
//! The signature is checked before anything is read or written. A verified
//! confirmation is recorded as a Paid gateway payment keyed by the gateway's
//! payment id, so replaying the same confirmation is a duplicate transaction.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{MemberId, Money, PlanId};
use crate::domain::membership::MembershipError;
use crate::domain::payment::{GatewayReference, GatewaySignatureVerifier, PaymentMethod, PaymentStatus};

use super::record_payment::{RecordPaymentCommand, RecordPaymentHandler, RecordPaymentResult};

/// Command carrying the gateway's checkout callback.
#[derive(Debug, Clone)]
pub struct VerifyGatewayPaymentCommand {
    pub member_id: MemberId,
    pub plan_id: PlanId,
    pub amount: Option<Money>,
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Handler for gateway payment verification.
pub struct VerifyGatewayPaymentHandler {
    verifier: Arc<GatewaySignatureVerifier>,
    record: Arc<RecordPaymentHandler>,
}

impl VerifyGatewayPaymentHandler {
    pub fn new(verifier: Arc<GatewaySignatureVerifier>, record: Arc<RecordPaymentHandler>) -> Self {
        Self { verifier, record }
    }

    pub async fn handle(
        &self,
        cmd: VerifyGatewayPaymentCommand,
    ) -> Result<RecordPaymentResult, MembershipError> {
        if cmd.order_id.trim().is_empty() {
            return Err(MembershipError::validation("order_id", "order_id is required"));
        }
        if cmd.payment_id.trim().is_empty() {
            return Err(MembershipError::validation("payment_id", "payment_id is required"));
        }

        if !self.verifier.verify(&cmd.order_id, &cmd.payment_id, &cmd.signature) {
            warn!(
                order_id = %cmd.order_id,
                payment_id = %cmd.payment_id,
                member_id = %cmd.member_id,
                "Gateway signature mismatch"
            );
            return Err(MembershipError::SignatureMismatch);
        }

        self.record
            .handle(RecordPaymentCommand {
                member_id: cmd.member_id,
                plan_id: cmd.plan_id,
                amount: cmd.amount,
                status: PaymentStatus::Paid,
                method: PaymentMethod::Gateway,
                transaction_id: Some(cmd.payment_id.clone()),
                gateway: Some(GatewayReference {
                    order_id: cmd.order_id,
                    payment_id: cmd.payment_id,
                }),
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{ts, Fixture};
    use crate::domain::membership::{MemberStatus, PlanDuration, ResetFromNow};
    use crate::domain::payment::compute_test_signature;
    use secrecy::Secret;

    const SECRET: &str = "gw_test_secret";

    fn handler(fx: &Fixture) -> VerifyGatewayPaymentHandler {
        let record = RecordPaymentHandler::new(
            fx.store.clone(),
            fx.store.clone(),
            fx.store.clone(),
            fx.clock.clone(),
            Arc::new(ResetFromNow),
        );
        VerifyGatewayPaymentHandler::new(
            Arc::new(GatewaySignatureVerifier::new(Secret::new(SECRET.to_string()))),
            Arc::new(record),
        )
    }

    fn command(member_id: MemberId, plan_id: PlanId, signature: String) -> VerifyGatewayPaymentCommand {
        VerifyGatewayPaymentCommand {
            member_id,
            plan_id,
            amount: None,
            order_id: "order_1".into(),
            payment_id: "pay_1".into(),
            signature,
        }
    }

    #[tokio::test]
    async fn valid_signature_records_gateway_payment_and_renews() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let plan = fx.plan("Basic Monthly", PlanDuration::Monthly, 2900).await;
        let member = fx.member("a@example.com", &plan).await;
        fx.clock.set(ts(2024, 2, 20));
        let sig = compute_test_signature(SECRET, "order_1", "pay_1");

        let result = handler(&fx).handle(command(member.id, plan.id, sig)).await.unwrap();

        assert_eq!(result.payment.method, PaymentMethod::Gateway);
        assert_eq!(result.payment.status, PaymentStatus::Paid);
        assert_eq!(result.payment.transaction_id.as_deref(), Some("pay_1"));
        assert_eq!(result.member.status, MemberStatus::Active);
        assert_eq!(result.member.end_date, Some(ts(2024, 3, 20)));
    }

    #[tokio::test]
    async fn mismatched_signature_writes_nothing() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let plan = fx.plan("Basic Monthly", PlanDuration::Monthly, 2900).await;
        let member = fx.member("a@example.com", &plan).await;
        let sig = compute_test_signature("wrong_secret", "order_1", "pay_1");

        let result = handler(&fx).handle(command(member.id, plan.id, sig)).await;

        assert_eq!(result.unwrap_err(), MembershipError::SignatureMismatch);
        assert_eq!(fx.store.payment_count(), 0);
        assert_eq!(fx.reload(&member.id).await, member);
    }

    #[tokio::test]
    async fn replayed_confirmation_is_duplicate() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let plan = fx.plan("Basic Monthly", PlanDuration::Monthly, 2900).await;
        let member = fx.member("a@example.com", &plan).await;
        let sig = compute_test_signature(SECRET, "order_1", "pay_1");
        handler(&fx).handle(command(member.id, plan.id, sig.clone())).await.unwrap();

        let result = handler(&fx).handle(command(member.id, plan.id, sig)).await;

        assert!(matches!(result, Err(MembershipError::DuplicateTransaction(_))));
        assert_eq!(fx.store.payment_count(), 1);
    }

    #[tokio::test]
    async fn blank_payment_id_is_validation_error() {
        let fx = Fixture::at(ts(2024, 1, 15));
        let plan = fx.plan("Basic Monthly", PlanDuration::Monthly, 2900).await;
        let member = fx.member("a@example.com", &plan).await;
        let mut cmd = command(member.id, plan.id, String::new());
        cmd.payment_id = " ".into();

        let result = handler(&fx).handle(cmd).await;

        assert!(matches!(result, Err(MembershipError::ValidationFailed { .. })));
    }
}
