//! Ledger queries: all payments and a member's payment history.

use std::sync::Arc;

use crate::domain::foundation::MemberId;
use crate::domain::membership::MembershipError;
use crate::domain::payment::Payment;
use crate::ports::{MemberRepository, PaymentLedger};

/// Lists every payment, newest first.
pub struct ListPaymentsHandler {
    ledger: Arc<dyn PaymentLedger>,
}

impl ListPaymentsHandler {
    pub fn new(ledger: Arc<dyn PaymentLedger>) -> Self {
        Self { ledger }
    }

    pub async fn handle(&self) -> Result<Vec<Payment>, MembershipError> {
        Ok(self.ledger.list_all().await?)
    }
}

/// Query for one member's payments.
#[derive(Debug, Clone)]
pub struct MemberPaymentHistoryQuery {
    pub member_id: MemberId,
}

/// Lists a member's payments, newest first.
pub struct MemberPaymentHistoryHandler {
    members: Arc<dyn MemberRepository>,
    ledger: Arc<dyn PaymentLedger>,
}

impl MemberPaymentHistoryHandler {
    pub fn new(members: Arc<dyn MemberRepository>, ledger: Arc<dyn PaymentLedger>) -> Self {
        Self { members, ledger }
    }

    pub async fn handle(&self, query: MemberPaymentHistoryQuery) -> Result<Vec<Payment>, MembershipError> {
        if self.members.find_by_id(&query.member_id).await?.is_none() {
            return Err(MembershipError::MemberNotFound(query.member_id));
        }
        Ok(self.ledger.list_for_member(&query.member_id).await?)
    }
}
