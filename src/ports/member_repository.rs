//! Member repository port.
//!
//! # Concurrency
//!
//! Writes are compare-and-swap on `Member::version`. `update` succeeds only
//! when the stored version still equals the version the caller read; the
//! stored copy then carries `version + 1`. A lost race surfaces as
//! `ConcurrencyConflict` and the caller re-reads.

use crate::domain::foundation::{DomainError, MemberId, Timestamp};
use crate::domain::membership::Member;
use async_trait::async_trait;

/// Repository port for Member aggregate persistence.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Persist a newly registered member.
    ///
    /// # Errors
    ///
    /// - `DuplicateEmail` if another member already uses the email
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, member: &Member) -> Result<(), DomainError>;

    /// Write back a modified member and return the stored copy.
    ///
    /// # Errors
    ///
    /// - `ConcurrencyConflict` if the stored version differs from `member.version`
    /// - `MemberNotFound` if the member no longer exists
    /// - `DuplicateEmail` if the new email belongs to someone else
    async fn update(&self, member: &Member) -> Result<Member, DomainError>;

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError>;

    /// Lookup by (lower-case) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, DomainError>;

    /// All members, most recently created first.
    async fn list(&self) -> Result<Vec<Member>, DomainError>;

    /// Members stored as Active whose end date is before `now`.
    async fn find_lapsed(&self, now: Timestamp) -> Result<Vec<Member>, DomainError>;

    /// Expire one member if it still is Active, past `end_date`, and at
    /// `expected_version`. Returns false when any of those no longer holds.
    async fn expire_if_lapsed(
        &self,
        id: &MemberId,
        expected_version: u64,
        now: Timestamp,
    ) -> Result<bool, DomainError>;

    /// Active members whose end date falls in `[from, until]`, soonest first.
    async fn list_expiring(
        &self,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<Member>, DomainError>;

    /// Remove a member. Returns false if it did not exist.
    async fn delete(&self, id: &MemberId) -> Result<bool, DomainError>;
}
