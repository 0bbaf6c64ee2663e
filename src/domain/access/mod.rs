//! Back-office operators and role-based access.
//!
//! Operators are the authenticated people working the desk. They are kept
//! apart from members: a member is what the lifecycle acts on, an operator
//! is who asks for it.

mod operator;
mod policy;
mod role;

pub use operator::Operator;
pub use policy::{authorize, AccessDenied, AccessPolicy, Decision, Operation, Requirement};
pub use role::Role;
