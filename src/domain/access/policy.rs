//! Role requirements for every back-office operation.
//!
//! All role checks go through [`AccessPolicy::check`], which reads the
//! table in [`Operation::requirement`]. Handlers never compare roles
//! themselves.

use super::Role;

const ADMIN_ONLY: &[Role] = &[Role::Admin];
const ANY_OPERATOR: &[Role] = &[Role::Admin, Role::Staff];

/// Operations exposed at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    RegisterMember,
    ListMembers,
    ViewMember,
    EditMember,
    DeleteMember,
    ListExpiringMembers,
    ViewMemberPayments,
    RecordPayment,
    ListPayments,
    CreateGatewayOrder,
    VerifyGatewayPayment,
    ListAssignablePlans,
    ListAllPlans,
    CreatePlan,
    UpdatePlan,
    DeactivatePlan,
    RunReconciler,
}

/// Who may perform an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// No caller identity needed.
    Public,
    /// Caller must hold one of these roles.
    Roles(&'static [Role]),
}

impl Operation {
    pub const ALL: [Operation; 17] = [
        Operation::RegisterMember,
        Operation::ListMembers,
        Operation::ViewMember,
        Operation::EditMember,
        Operation::DeleteMember,
        Operation::ListExpiringMembers,
        Operation::ViewMemberPayments,
        Operation::RecordPayment,
        Operation::ListPayments,
        Operation::CreateGatewayOrder,
        Operation::VerifyGatewayPayment,
        Operation::ListAssignablePlans,
        Operation::ListAllPlans,
        Operation::CreatePlan,
        Operation::UpdatePlan,
        Operation::DeactivatePlan,
        Operation::RunReconciler,
    ];

    pub fn requirement(&self) -> Requirement {
        use Operation::*;
        match self {
            ListAssignablePlans => Requirement::Public,

            CreatePlan | UpdatePlan | DeactivatePlan | DeleteMember | RunReconciler => {
                Requirement::Roles(ADMIN_ONLY)
            }

            RegisterMember
            | ListMembers
            | ViewMember
            | EditMember
            | ListExpiringMembers
            | ViewMemberPayments
            | RecordPayment
            | ListPayments
            | CreateGatewayOrder
            | VerifyGatewayPayment
            | ListAllPlans => Requirement::Roles(ANY_OPERATOR),
        }
    }

    pub fn name(&self) -> &'static str {
        use Operation::*;
        match self {
            RegisterMember => "register_member",
            ListMembers => "list_members",
            ViewMember => "view_member",
            EditMember => "edit_member",
            DeleteMember => "delete_member",
            ListExpiringMembers => "list_expiring_members",
            ViewMemberPayments => "view_member_payments",
            RecordPayment => "record_payment",
            ListPayments => "list_payments",
            CreateGatewayOrder => "create_gateway_order",
            VerifyGatewayPayment => "verify_gateway_payment",
            ListAssignablePlans => "list_assignable_plans",
            ListAllPlans => "list_all_plans",
            CreatePlan => "create_plan",
            UpdatePlan => "update_plan",
            DeactivatePlan => "deactivate_plan",
            RunReconciler => "run_reconciler",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome of a role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// Allow iff `caller` is one of `required`.
pub fn authorize(caller: Role, required: &[Role]) -> Decision {
    if required.contains(&caller) {
        Decision::Allow
    } else {
        Decision::Deny
    }
}

/// Why a caller was turned away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDenied {
    /// No verified identity.
    Unauthenticated,
    /// Identity known, role insufficient.
    Forbidden { operation: Operation, role: Role },
}

/// Applies the operation table to a caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    /// `caller` is the resolved role, or `None` for an anonymous request.
    pub fn check(&self, caller: Option<Role>, operation: Operation) -> Result<(), AccessDenied> {
        match operation.requirement() {
            Requirement::Public => Ok(()),
            Requirement::Roles(required) => {
                let role = caller.ok_or(AccessDenied::Unauthenticated)?;
                match authorize(role, required) {
                    Decision::Allow => Ok(()),
                    Decision::Deny => Err(AccessDenied::Forbidden { operation, role }),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_is_set_membership() {
        assert_eq!(authorize(Role::Admin, ADMIN_ONLY), Decision::Allow);
        assert_eq!(authorize(Role::Staff, ADMIN_ONLY), Decision::Deny);
        assert_eq!(authorize(Role::Staff, ANY_OPERATOR), Decision::Allow);
        assert_eq!(authorize(Role::Admin, &[]), Decision::Deny);
    }

    #[test]
    fn plan_mutations_and_member_deletion_are_admin_only() {
        for op in [
            Operation::CreatePlan,
            Operation::UpdatePlan,
            Operation::DeactivatePlan,
            Operation::DeleteMember,
        ] {
            assert_eq!(op.requirement(), Requirement::Roles(ADMIN_ONLY), "{}", op);
        }
    }

    #[test]
    fn assignable_plan_listing_is_public() {
        assert_eq!(AccessPolicy.check(None, Operation::ListAssignablePlans), Ok(()));
    }

    #[test]
    fn staff_can_run_member_and_payment_operations() {
        for op in [
            Operation::RegisterMember,
            Operation::EditMember,
            Operation::RecordPayment,
            Operation::VerifyGatewayPayment,
        ] {
            assert_eq!(AccessPolicy.check(Some(Role::Staff), op), Ok(()));
        }
    }

    #[test]
    fn staff_cannot_deactivate_plan() {
        assert_eq!(
            AccessPolicy.check(Some(Role::Staff), Operation::DeactivatePlan),
            Err(AccessDenied::Forbidden {
                operation: Operation::DeactivatePlan,
                role: Role::Staff
            })
        );
    }

    #[test]
    fn anonymous_is_unauthenticated_not_forbidden() {
        assert_eq!(
            AccessPolicy.check(None, Operation::DeactivatePlan),
            Err(AccessDenied::Unauthenticated)
        );
    }

    #[test]
    fn admin_passes_every_operation() {
        for op in Operation::ALL {
            assert_eq!(AccessPolicy.check(Some(Role::Admin), op), Ok(()), "{}", op);
        }
    }
}
