//! Payment ledger port.
//!
//! The ledger is append-only. A payment that renews a subscription is
//! appended together with the renewed member in one atomic step: either
//! both are stored or neither is.

use crate::domain::foundation::{DomainError, MemberId};
use crate::domain::membership::Member;
use crate::domain::payment::Payment;
use async_trait::async_trait;

#[async_trait]
pub trait PaymentLedger: Send + Sync {
    /// Append `payment`, and if `renewed` is given, compare-and-swap the
    /// member in the same transaction. Returns the stored member.
    ///
    /// # Errors
    ///
    /// - `DuplicateTransaction` if the transaction id is already recorded
    /// - `ConcurrencyConflict` if the member moved past `renewed.version`
    /// - `MemberNotFound` if the member was deleted meanwhile
    ///
    /// On any error nothing is written.
    async fn append(
        &self,
        payment: &Payment,
        renewed: Option<&Member>,
    ) -> Result<Option<Member>, DomainError>;

    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Payment>, DomainError>;

    /// Payments for one member, newest first.
    async fn list_for_member(&self, member_id: &MemberId) -> Result<Vec<Payment>, DomainError>;

    /// Every payment, newest first.
    async fn list_all(&self) -> Result<Vec<Payment>, DomainError>;
}
