//! In-memory persistence for members, plans, payments and operators.
//!
//! All tables sit behind a single mutex, so multi-table operations (a ledger
//! append plus a member renewal) are atomic. Used when no database URL is
//! configured and by the test suites.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::access::Operator;
use crate::domain::foundation::{
    DomainError, ErrorCode, MemberId, PlanId, SubjectId, Timestamp,
};
use crate::domain::membership::{Member, Plan};
use crate::domain::payment::Payment;
use crate::ports::{MemberRepository, OperatorDirectory, PaymentLedger, PlanRepository};

#[derive(Default)]
struct Tables {
    members: HashMap<MemberId, Member>,
    plans: HashMap<PlanId, Plan>,
    payments: Vec<Payment>,
    operators: HashMap<SubjectId, Operator>,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<&MemberId>) -> bool {
        self.members
            .values()
            .any(|m| m.profile.email == email && Some(&m.id) != except)
    }

    fn plan_name_taken(&self, name: &str, except: Option<&PlanId>) -> bool {
        self.plans
            .values()
            .any(|p| p.name.eq_ignore_ascii_case(name) && Some(&p.id) != except)
    }

    /// Checks the compare-and-swap preconditions for writing `member`.
    fn check_member_write(&self, member: &Member) -> Result<(), DomainError> {
        let stored = self.members.get(&member.id).ok_or_else(|| {
            DomainError::new(ErrorCode::MemberNotFound, "Member not found")
                .with_detail("member_id", member.id.to_string())
        })?;
        if stored.version != member.version {
            return Err(DomainError::conflict(format!(
                "member {} is at version {}, write was based on {}",
                member.id, stored.version, member.version
            )));
        }
        if self.email_taken(&member.profile.email, Some(&member.id)) {
            return Err(duplicate_email(&member.profile.email));
        }
        Ok(())
    }

    fn write_member(&mut self, member: &Member) -> Member {
        let mut stored = member.clone();
        stored.version = member.version + 1;
        self.members.insert(stored.id, stored.clone());
        stored
    }
}

fn duplicate_email(email: &str) -> DomainError {
    DomainError::new(ErrorCode::DuplicateEmail, "Email already registered")
        .with_detail("email", email)
}

fn newest_first(payments: &mut [Payment]) {
    payments.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
}

/// Single-process store implementing every persistence port.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, DomainError> {
        self.tables
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "in-memory store lock poisoned"))
    }

    /// Number of ledger rows (for test assertions).
    pub fn payment_count(&self) -> usize {
        self.lock().map(|t| t.payments.len()).unwrap_or(0)
    }
}

#[async_trait]
impl MemberRepository for InMemoryStore {
    async fn insert(&self, member: &Member) -> Result<(), DomainError> {
        let mut tables = self.lock()?;
        if tables.email_taken(&member.profile.email, None) {
            return Err(duplicate_email(&member.profile.email));
        }
        tables.members.insert(member.id, member.clone());
        Ok(())
    }

    async fn update(&self, member: &Member) -> Result<Member, DomainError> {
        let mut tables = self.lock()?;
        tables.check_member_write(member)?;
        Ok(tables.write_member(member))
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        Ok(self.lock()?.members.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, DomainError> {
        Ok(self
            .lock()?
            .members
            .values()
            .find(|m| m.profile.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Member>, DomainError> {
        let mut members: Vec<Member> = self.lock()?.members.values().cloned().collect();
        members.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(members)
    }

    async fn find_lapsed(&self, now: Timestamp) -> Result<Vec<Member>, DomainError> {
        Ok(self
            .lock()?
            .members
            .values()
            .filter(|m| m.is_lapsed(now))
            .cloned()
            .collect())
    }

    async fn expire_if_lapsed(
        &self,
        id: &MemberId,
        expected_version: u64,
        now: Timestamp,
    ) -> Result<bool, DomainError> {
        let mut tables = self.lock()?;
        let Some(member) = tables.members.get_mut(id) else {
            return Ok(false);
        };
        if member.version != expected_version || !member.expire_if_elapsed(now) {
            return Ok(false);
        }
        member.version += 1;
        Ok(true)
    }

    async fn list_expiring(
        &self,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<Member>, DomainError> {
        let mut members: Vec<Member> = self
            .lock()?
            .members
            .values()
            .filter(|m| m.expires_between(from, until))
            .cloned()
            .collect();
        members.sort_by_key(|m| m.end_date);
        Ok(members)
    }

    async fn delete(&self, id: &MemberId) -> Result<bool, DomainError> {
        Ok(self.lock()?.members.remove(id).is_some())
    }
}

#[async_trait]
impl PlanRepository for InMemoryStore {
    async fn insert(&self, plan: &Plan) -> Result<(), DomainError> {
        let mut tables = self.lock()?;
        if tables.plan_name_taken(&plan.name, None) {
            return Err(DomainError::new(ErrorCode::DuplicatePlanName, "Plan name taken")
                .with_detail("name", plan.name.clone()));
        }
        tables.plans.insert(plan.id, plan.clone());
        Ok(())
    }

    async fn update(&self, plan: &Plan) -> Result<(), DomainError> {
        let mut tables = self.lock()?;
        if !tables.plans.contains_key(&plan.id) {
            return Err(DomainError::new(ErrorCode::PlanNotFound, "Plan not found")
                .with_detail("plan_id", plan.id.to_string()));
        }
        if tables.plan_name_taken(&plan.name, Some(&plan.id)) {
            return Err(DomainError::new(ErrorCode::DuplicatePlanName, "Plan name taken")
                .with_detail("name", plan.name.clone()));
        }
        tables.plans.insert(plan.id, plan.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PlanId) -> Result<Option<Plan>, DomainError> {
        Ok(self.lock()?.plans.get(id).cloned())
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Plan>, DomainError> {
        let mut plans: Vec<Plan> = self
            .lock()?
            .plans
            .values()
            .filter(|p| p.is_active || !active_only)
            .cloned()
            .collect();
        plans.sort_by(|a, b| a.price.cmp(&b.price).then_with(|| a.name.cmp(&b.name)));
        Ok(plans)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.lock()?.plans.len() as u64)
    }
}

#[async_trait]
impl PaymentLedger for InMemoryStore {
    async fn append(
        &self,
        payment: &Payment,
        renewed: Option<&Member>,
    ) -> Result<Option<Member>, DomainError> {
        let mut tables = self.lock()?;

        if let Some(txn) = &payment.transaction_id {
            if tables.payments.iter().any(|p| p.transaction_id.as_ref() == Some(txn)) {
                return Err(DomainError::new(
                    ErrorCode::DuplicateTransaction,
                    "Transaction already recorded",
                )
                .with_detail("transaction_id", txn.clone()));
            }
        }
        if let Some(member) = renewed {
            tables.check_member_write(member)?;
        }

        // Preconditions hold; nothing below can fail.
        tables.payments.push(payment.clone());
        Ok(renewed.map(|member| tables.write_member(member)))
    }

    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Payment>, DomainError> {
        Ok(self
            .lock()?
            .payments
            .iter()
            .find(|p| p.transaction_id.as_deref() == Some(transaction_id))
            .cloned())
    }

    async fn list_for_member(&self, member_id: &MemberId) -> Result<Vec<Payment>, DomainError> {
        let mut payments: Vec<Payment> = self
            .lock()?
            .payments
            .iter()
            .filter(|p| &p.member_id == member_id)
            .cloned()
            .collect();
        newest_first(&mut payments);
        Ok(payments)
    }

    async fn list_all(&self) -> Result<Vec<Payment>, DomainError> {
        let mut payments = self.lock()?.payments.clone();
        newest_first(&mut payments);
        Ok(payments)
    }
}

#[async_trait]
impl OperatorDirectory for InMemoryStore {
    async fn find_by_subject(&self, subject: &SubjectId) -> Result<Option<Operator>, DomainError> {
        Ok(self.lock()?.operators.get(subject).cloned())
    }

    async fn insert(&self, operator: &Operator) -> Result<(), DomainError> {
        let mut tables = self.lock()?;
        if tables.operators.contains_key(&operator.subject) {
            return Err(DomainError::new(ErrorCode::DuplicateSubject, "Operator already exists")
                .with_detail("subject", operator.subject.to_string()));
        }
        tables.operators.insert(operator.subject.clone(), operator.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Money, PaymentId};
    use crate::domain::membership::{MemberProfile, MemberStatus, PlanDuration, ResetFromNow};
    use crate::domain::payment::{NewPayment, PaymentMethod, PaymentStatus};

    fn ts(y: i32, m: u32, d: u32) -> Timestamp {
        Timestamp::from_ymd_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn plan() -> Plan {
        Plan::new(
            PlanId::new(),
            "Basic Monthly",
            PlanDuration::Monthly,
            Money::from_cents(2900).unwrap(),
            "desc",
            ts(2024, 1, 1),
        )
        .unwrap()
    }

    fn member(email: &str, plan: &Plan, on: Timestamp) -> Member {
        let profile = MemberProfile::new("Kim", "Lee", email, None, None).unwrap();
        Member::register(MemberId::new(), profile, plan, on, &ResetFromNow).unwrap()
    }

    fn payment(member: &Member, plan: &Plan, txn: Option<&str>) -> Payment {
        Payment::record(
            PaymentId::new(),
            NewPayment {
                member_id: member.id,
                plan_id: plan.id,
                amount: plan.price,
                status: PaymentStatus::Paid,
                method: PaymentMethod::Manual,
                transaction_id: txn.map(String::from),
                gateway: None,
            },
            ts(2024, 2, 20),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_email() {
        let store = InMemoryStore::new();
        let plan = plan();
        MemberRepository::insert(&store, &member("kim@example.com", &plan, ts(2024, 1, 15)))
            .await
            .unwrap();

        let err = MemberRepository::insert(&store, &member("kim@example.com", &plan, ts(2024, 1, 16)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateEmail);
    }

    #[tokio::test]
    async fn update_bumps_version_and_rejects_stale_writes() {
        let store = InMemoryStore::new();
        let plan = plan();
        let original = member("kim@example.com", &plan, ts(2024, 1, 15));
        MemberRepository::insert(&store, &original).await.unwrap();

        let mut first = original.clone();
        first.set_status(MemberStatus::Suspended, ts(2024, 1, 20)).unwrap();
        let stored = MemberRepository::update(&store, &first).await.unwrap();
        assert_eq!(stored.version, 1);

        let mut stale = original.clone();
        stale.set_status(MemberStatus::Expired, ts(2024, 1, 21)).unwrap();
        let err = MemberRepository::update(&store, &stale).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConcurrencyConflict);

        let current = MemberRepository::find_by_id(&store, &original.id).await.unwrap().unwrap();
        assert_eq!(current.status, MemberStatus::Suspended);
    }

    #[tokio::test]
    async fn list_expiring_keeps_active_members_inside_window() {
        let store = InMemoryStore::new();
        let plan = plan();
        let soon = member("soon@example.com", &plan, ts(2024, 1, 15));
        let later = member("later@example.com", &plan, ts(2024, 1, 30));
        let mut held = member("held@example.com", &plan, ts(2024, 1, 16));
        held.set_status(MemberStatus::Suspended, ts(2024, 1, 20)).unwrap();
        for m in [&soon, &later, &held] {
            MemberRepository::insert(&store, m).await.unwrap();
        }

        let expiring = store.list_expiring(ts(2024, 2, 10), ts(2024, 2, 17)).await.unwrap();

        assert_eq!(expiring.len(), 1);
        assert_eq!(expiring[0].id, soon.id);
    }

    #[tokio::test]
    async fn expire_if_lapsed_respects_version_and_precondition() {
        let store = InMemoryStore::new();
        let plan = plan();
        let m = member("kim@example.com", &plan, ts(2024, 1, 15));
        MemberRepository::insert(&store, &m).await.unwrap();

        assert!(!store.expire_if_lapsed(&m.id, 0, ts(2024, 2, 1)).await.unwrap());
        assert!(!store.expire_if_lapsed(&m.id, 7, ts(2024, 3, 1)).await.unwrap());
        assert!(store.expire_if_lapsed(&m.id, 0, ts(2024, 3, 1)).await.unwrap());
        assert!(!store.expire_if_lapsed(&m.id, 1, ts(2024, 3, 1)).await.unwrap());
    }

    #[tokio::test]
    async fn append_with_stale_member_writes_nothing() {
        let store = InMemoryStore::new();
        let plan = plan();
        let m = member("kim@example.com", &plan, ts(2024, 1, 15));
        MemberRepository::insert(&store, &m).await.unwrap();

        let mut stale = m.clone();
        stale.version = 5;
        let err = store
            .append(&payment(&m, &plan, Some("txn_1")), Some(&stale))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ConcurrencyConflict);
        assert_eq!(store.payment_count(), 0);
    }

    #[tokio::test]
    async fn append_rejects_duplicate_transaction() {
        let store = InMemoryStore::new();
        let plan = plan();
        let m = member("kim@example.com", &plan, ts(2024, 1, 15));
        MemberRepository::insert(&store, &m).await.unwrap();

        store.append(&payment(&m, &plan, Some("txn_1")), None).await.unwrap();
        let err = store
            .append(&payment(&m, &plan, Some("txn_1")), None)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DuplicateTransaction);
        assert_eq!(store.payment_count(), 1);
    }

    #[tokio::test]
    async fn payments_without_transaction_id_never_collide() {
        let store = InMemoryStore::new();
        let plan = plan();
        let m = member("kim@example.com", &plan, ts(2024, 1, 15));

        store.append(&payment(&m, &plan, None), None).await.unwrap();
        store.append(&payment(&m, &plan, None), None).await.unwrap();
        assert_eq!(store.list_for_member(&m.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn plan_list_filters_inactive() {
        let store = InMemoryStore::new();
        let mut retired = plan();
        retired.deactivate(ts(2024, 1, 2));
        PlanRepository::insert(&store, &retired).await.unwrap();

        assert!(PlanRepository::list(&store, true).await.unwrap().is_empty());
        assert_eq!(PlanRepository::list(&store, false).await.unwrap().len(), 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn plan_names_are_unique_case_insensitively() {
        let store = InMemoryStore::new();
        PlanRepository::insert(&store, &plan()).await.unwrap();
        let mut twin = plan();
        twin.name = "basic monthly".into();

        let err = PlanRepository::insert(&store, &twin).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicatePlanName);
    }
}
