//! Shared application state for the axum router.

use std::sync::Arc;

use crate::application::handlers::membership::{
    DeleteMemberHandler, EditMemberHandler, GetMemberHandler, ListExpiringMembersHandler,
    ListMembersHandler, RegisterMemberHandler,
};
use crate::application::handlers::operator::{
    AuthorizeOperationHandler, CurrentOperatorHandler, SyncOperatorHandler,
};
use crate::application::handlers::payment::{
    CreateGatewayOrderHandler, ListPaymentsHandler, MemberPaymentHistoryHandler,
    RecordPaymentHandler, VerifyGatewayPaymentHandler,
};
use crate::application::handlers::plan::{
    CreatePlanHandler, DeactivatePlanHandler, ListPlansHandler, UpdatePlanHandler,
};
use crate::application::handlers::reconcile::ExpiryReconciler;
use crate::domain::access::{Operation, Operator};
use crate::domain::foundation::{AuthenticatedUser, Timestamp};
use crate::domain::membership::RenewalPolicy;
use crate::domain::payment::GatewaySignatureVerifier;
use crate::ports::{
    Clock, MemberRepository, OperatorDirectory, PaymentGateway, PaymentLedger, PlanRepository,
};

use super::error::ApiError;

/// Shared application state containing all dependencies.
///
/// Cloned per request; every field is Arc-wrapped. Handlers are built on
/// demand from the ports.
#[derive(Clone)]
pub struct AppState {
    pub members: Arc<dyn MemberRepository>,
    pub plans: Arc<dyn PlanRepository>,
    pub ledger: Arc<dyn PaymentLedger>,
    pub operators: Arc<dyn OperatorDirectory>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub clock: Arc<dyn Clock>,
    pub renewal: Arc<dyn RenewalPolicy>,
    pub verifier: Arc<GatewaySignatureVerifier>,
    pub admin_emails: Arc<Vec<String>>,
    pub currency: String,
}

impl AppState {
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Resolves the caller's operator and checks it against the access table.
    pub async fn authorize(
        &self,
        user: Option<&AuthenticatedUser>,
        operation: Operation,
    ) -> Result<Option<Operator>, ApiError> {
        Ok(AuthorizeOperationHandler::new(self.operators.clone())
            .handle(user, operation)
            .await?)
    }

    // ── Operators ──────────────────────────────────────────────────────────────

    pub fn sync_operator_handler(&self) -> SyncOperatorHandler {
        SyncOperatorHandler::new(
            self.operators.clone(),
            self.clock.clone(),
            self.admin_emails.as_ref().clone(),
        )
    }

    pub fn current_operator_handler(&self) -> CurrentOperatorHandler {
        CurrentOperatorHandler::new(self.operators.clone())
    }

    // ── Members ────────────────────────────────────────────────────────────────

    pub fn register_member_handler(&self) -> RegisterMemberHandler {
        RegisterMemberHandler::new(
            self.members.clone(),
            self.plans.clone(),
            self.clock.clone(),
            self.renewal.clone(),
        )
    }

    pub fn edit_member_handler(&self) -> EditMemberHandler {
        EditMemberHandler::new(
            self.members.clone(),
            self.plans.clone(),
            self.clock.clone(),
            self.renewal.clone(),
        )
    }

    pub fn delete_member_handler(&self) -> DeleteMemberHandler {
        DeleteMemberHandler::new(self.members.clone())
    }

    pub fn get_member_handler(&self) -> GetMemberHandler {
        GetMemberHandler::new(self.members.clone(), self.clock.clone())
    }

    pub fn list_members_handler(&self) -> ListMembersHandler {
        ListMembersHandler::new(self.members.clone(), self.clock.clone())
    }

    pub fn list_expiring_handler(&self) -> ListExpiringMembersHandler {
        ListExpiringMembersHandler::new(self.members.clone(), self.clock.clone())
    }

    // ── Payments ───────────────────────────────────────────────────────────────

    pub fn record_payment_handler(&self) -> RecordPaymentHandler {
        RecordPaymentHandler::new(
            self.members.clone(),
            self.plans.clone(),
            self.ledger.clone(),
            self.clock.clone(),
            self.renewal.clone(),
        )
    }

    pub fn verify_payment_handler(&self) -> VerifyGatewayPaymentHandler {
        VerifyGatewayPaymentHandler::new(
            self.verifier.clone(),
            Arc::new(self.record_payment_handler()),
        )
    }

    pub fn create_order_handler(&self) -> CreateGatewayOrderHandler {
        CreateGatewayOrderHandler::new(self.gateway.clone(), self.clock.clone(), self.currency.clone())
    }

    pub fn list_payments_handler(&self) -> ListPaymentsHandler {
        ListPaymentsHandler::new(self.ledger.clone())
    }

    pub fn member_payments_handler(&self) -> MemberPaymentHistoryHandler {
        MemberPaymentHistoryHandler::new(self.members.clone(), self.ledger.clone())
    }

    // ── Plans ──────────────────────────────────────────────────────────────────

    pub fn create_plan_handler(&self) -> CreatePlanHandler {
        CreatePlanHandler::new(self.plans.clone(), self.clock.clone())
    }

    pub fn update_plan_handler(&self) -> UpdatePlanHandler {
        UpdatePlanHandler::new(self.plans.clone(), self.clock.clone())
    }

    pub fn deactivate_plan_handler(&self) -> DeactivatePlanHandler {
        DeactivatePlanHandler::new(self.plans.clone(), self.clock.clone())
    }

    pub fn list_plans_handler(&self) -> ListPlansHandler {
        ListPlansHandler::new(self.plans.clone())
    }

    // ── Reconciler ─────────────────────────────────────────────────────────────

    pub fn reconciler(&self) -> ExpiryReconciler {
        ExpiryReconciler::new(self.members.clone(), self.clock.clone())
    }
}
