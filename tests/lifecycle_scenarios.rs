//! End-to-end lifecycle scenarios against the in-memory store.
//!
//! Each scenario drives the application handlers the way the HTTP layer
//! does, with a fixed clock so the dates in assertions are exact.

use std::sync::Arc;

use hmac::{Hmac, Mac};
use secrecy::Secret;
use sha2::Sha256;

use memberdesk::adapters::{FixedClock, InMemoryStore};
use memberdesk::application::{
    AuthorizeOperationHandler, DeactivatePlanCommand, DeactivatePlanHandler, ExpiryReconciler,
    GetMemberHandler, GetMemberQuery, ListPlansHandler, ListPlansQuery, RecordPaymentCommand,
    RecordPaymentHandler, RegisterMemberCommand, RegisterMemberHandler, SeedDefaultPlansHandler,
    SyncOperatorHandler, VerifyGatewayPaymentCommand, VerifyGatewayPaymentHandler,
};
use memberdesk::domain::access::{Operation, Role};
use memberdesk::domain::foundation::{AuthenticatedUser, SubjectId, Timestamp};
use memberdesk::domain::membership::{Member, MemberStatus, MembershipError, Plan, ResetFromNow};
use memberdesk::domain::payment::{GatewaySignatureVerifier, PaymentMethod, PaymentStatus};
use memberdesk::ports::PaymentLedger;

const GATEWAY_SECRET: &str = "scenario_gateway_secret";

// =============================================================================
// Test Infrastructure
// =============================================================================

fn ts(year: i32, month: u32, day: u32) -> Timestamp {
    Timestamp::from_ymd_hms(year, month, day, 0, 0, 0).unwrap()
}

fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{}|{}", order_id, payment_id).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn user(name: &str) -> AuthenticatedUser {
    AuthenticatedUser::new(
        SubjectId::new(format!("sub-{}", name)).unwrap(),
        format!("{}@desk.example.com", name),
        None,
    )
}

struct Desk {
    store: Arc<InMemoryStore>,
    clock: Arc<FixedClock>,
}

impl Desk {
    async fn open_at(now: Timestamp) -> Self {
        let desk = Self {
            store: Arc::new(InMemoryStore::new()),
            clock: Arc::new(FixedClock::at(now)),
        };
        SeedDefaultPlansHandler::new(desk.store.clone(), desk.clock.clone())
            .handle()
            .await
            .unwrap();
        desk
    }

    async fn plan(&self, name: &str) -> Plan {
        ListPlansHandler::new(self.store.clone())
            .handle(ListPlansQuery { include_inactive: false })
            .await
            .unwrap()
            .into_iter()
            .find(|p| p.name == name)
            .unwrap()
    }

    async fn register(&self, email: &str, plan: &Plan) -> Member {
        RegisterMemberHandler::new(
            self.store.clone(),
            self.store.clone(),
            self.clock.clone(),
            Arc::new(ResetFromNow),
        )
        .handle(RegisterMemberCommand {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            phone: None,
            address: None,
            plan_id: plan.id,
        })
        .await
        .unwrap()
    }

    fn record_payment_handler(&self) -> RecordPaymentHandler {
        RecordPaymentHandler::new(
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.clock.clone(),
            Arc::new(ResetFromNow),
        )
    }

    fn verify_handler(&self) -> VerifyGatewayPaymentHandler {
        VerifyGatewayPaymentHandler::new(
            Arc::new(GatewaySignatureVerifier::new(Secret::new(GATEWAY_SECRET.to_string()))),
            Arc::new(self.record_payment_handler()),
        )
    }

    async fn member(&self, member: &Member) -> Member {
        GetMemberHandler::new(self.store.clone(), self.clock.clone())
            .handle(GetMemberQuery { member_id: member.id })
            .await
            .unwrap()
            .member
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn monthly_member_lapses_then_renews_from_payment_date() {
    let desk = Desk::open_at(ts(2024, 1, 15)).await;
    let monthly = desk.plan("Basic Monthly").await;
    let member = desk.register("ada@example.com", &monthly).await;
    assert_eq!(member.status, MemberStatus::Active);
    assert_eq!(member.end_date, Some(ts(2024, 2, 15)));

    desk.clock.set(ts(2024, 2, 20));
    let report = ExpiryReconciler::new(desk.store.clone(), desk.clock.clone())
        .handle()
        .await
        .unwrap();
    assert_eq!(report.expired, 1);
    assert_eq!(desk.member(&member).await.status, MemberStatus::Expired);

    let result = desk
        .record_payment_handler()
        .handle(RecordPaymentCommand {
            member_id: member.id,
            plan_id: monthly.id,
            amount: None,
            status: PaymentStatus::Paid,
            method: PaymentMethod::Manual,
            transaction_id: None,
            gateway: None,
        })
        .await
        .unwrap();

    assert_eq!(result.payment.amount.cents(), 2900);
    let renewed = desk.member(&member).await;
    assert_eq!(renewed.status, MemberStatus::Active);
    assert_eq!(renewed.start_date, Some(ts(2024, 2, 20)));
    assert_eq!(renewed.end_date, Some(ts(2024, 3, 20)));
}

#[tokio::test]
async fn second_reconcile_pass_changes_nothing() {
    let desk = Desk::open_at(ts(2024, 1, 15)).await;
    let monthly = desk.plan("Basic Monthly").await;
    desk.register("ada@example.com", &monthly).await;
    desk.register("grace@example.com", &monthly).await;
    desk.clock.set(ts(2024, 2, 20));
    let reconciler = ExpiryReconciler::new(desk.store.clone(), desk.clock.clone());

    let first = reconciler.handle().await.unwrap();
    let second = reconciler.handle().await.unwrap();

    assert_eq!(first.expired, 2);
    assert_eq!(second.scanned, 0);
    assert_eq!(second.expired, 0);
}

#[tokio::test]
async fn forged_gateway_confirmation_writes_nothing() {
    let desk = Desk::open_at(ts(2024, 1, 15)).await;
    let yearly = desk.plan("Premium Yearly").await;
    let member = desk.register("ada@example.com", &yearly).await;

    let result = desk
        .verify_handler()
        .handle(VerifyGatewayPaymentCommand {
            member_id: member.id,
            plan_id: yearly.id,
            amount: None,
            order_id: "order_9".into(),
            payment_id: "pay_9".into(),
            signature: sign("not_the_secret", "order_9", "pay_9"),
        })
        .await;

    assert_eq!(result.unwrap_err(), MembershipError::SignatureMismatch);
    assert!(desk.store.list_all().await.unwrap().is_empty());
    assert_eq!(desk.member(&member).await, member);
}

#[tokio::test]
async fn verified_gateway_payment_is_recorded_once() {
    let desk = Desk::open_at(ts(2024, 1, 15)).await;
    let quarterly = desk.plan("Standard Quarterly").await;
    let member = desk.register("ada@example.com", &quarterly).await;
    let command = VerifyGatewayPaymentCommand {
        member_id: member.id,
        plan_id: quarterly.id,
        amount: None,
        order_id: "order_1".into(),
        payment_id: "pay_1".into(),
        signature: sign(GATEWAY_SECRET, "order_1", "pay_1"),
    };

    let first = desk.verify_handler().handle(command.clone()).await.unwrap();
    let replay = desk.verify_handler().handle(command).await;

    assert_eq!(first.payment.transaction_id.as_deref(), Some("pay_1"));
    assert_eq!(first.member.end_date, Some(ts(2024, 4, 15)));
    assert_eq!(
        replay.unwrap_err(),
        MembershipError::DuplicateTransaction("pay_1".into())
    );
    assert_eq!(desk.store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn only_admin_may_deactivate_a_plan() {
    let desk = Desk::open_at(ts(2024, 1, 15)).await;
    let admin_emails = vec!["owner@desk.example.com".to_string()];
    let sync = SyncOperatorHandler::new(desk.store.clone(), desk.clock.clone(), admin_emails);
    let owner = user("owner");
    let clerk = user("clerk");
    assert_eq!(sync.handle(&owner).await.unwrap().role, Role::Admin);
    assert_eq!(sync.handle(&clerk).await.unwrap().role, Role::Staff);
    let authorize = AuthorizeOperationHandler::new(desk.store.clone());

    let denied = authorize.handle(Some(&clerk), Operation::DeactivatePlan).await;
    assert!(matches!(denied, Err(MembershipError::Forbidden { .. })));

    let allowed = authorize
        .handle(Some(&owner), Operation::DeactivatePlan)
        .await
        .unwrap();
    assert_eq!(allowed.map(|o| o.role), Some(Role::Admin));

    let monthly = desk.plan("Basic Monthly").await;
    let deactivated = DeactivatePlanHandler::new(desk.store.clone(), desk.clock.clone())
        .handle(DeactivatePlanCommand { plan_id: monthly.id })
        .await
        .unwrap();
    assert!(!deactivated.is_active);

    let assignable = ListPlansHandler::new(desk.store.clone())
        .handle(ListPlansQuery { include_inactive: false })
        .await
        .unwrap();
    assert_eq!(assignable.len(), 2);
}

#[tokio::test]
async fn unknown_caller_is_forbidden_until_synced() {
    let desk = Desk::open_at(ts(2024, 1, 15)).await;
    let authorize = AuthorizeOperationHandler::new(desk.store.clone());
    let stranger = user("stranger");

    let result = authorize.handle(Some(&stranger), Operation::ListMembers).await;
    assert!(matches!(result, Err(MembershipError::Forbidden { .. })));

    let anonymous = authorize.handle(None, Operation::ListMembers).await;
    assert_eq!(anonymous.unwrap_err(), MembershipError::Unauthenticated);

    let public = authorize.handle(None, Operation::ListAssignablePlans).await;
    assert_eq!(public.unwrap(), None);
}
