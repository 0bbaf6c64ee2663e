//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers write through the ports; query handlers only read.

pub mod handlers;

pub use handlers::membership::{
    DeleteMemberCommand, DeleteMemberHandler, EditMemberCommand, EditMemberHandler, GetMemberHandler,
    GetMemberQuery, ListExpiringMembersHandler, ListExpiringMembersQuery, ListMembersHandler,
    MemberView, RegisterMemberCommand, RegisterMemberHandler, DEFAULT_EXPIRING_DAYS,
    MAX_EXPIRING_DAYS,
};
pub use handlers::operator::{AuthorizeOperationHandler, CurrentOperatorHandler, SyncOperatorHandler};
pub use handlers::payment::{
    CreateGatewayOrderCommand, CreateGatewayOrderHandler, ListPaymentsHandler,
    MemberPaymentHistoryHandler, MemberPaymentHistoryQuery, RecordPaymentCommand,
    RecordPaymentHandler, RecordPaymentResult, VerifyGatewayPaymentCommand,
    VerifyGatewayPaymentHandler,
};
pub use handlers::plan::{
    CreatePlanCommand, CreatePlanHandler, DeactivatePlanCommand, DeactivatePlanHandler,
    ListPlansHandler, ListPlansQuery, SeedDefaultPlansHandler, UpdatePlanCommand, UpdatePlanHandler,
};
pub use handlers::reconcile::{ExpiryReconciler, ReconcileReport};
