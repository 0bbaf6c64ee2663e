//! Member handlers.
//!
//! ## Commands
//! - Registering a member on a plan
//! - Editing profile, plan and status
//! - Deleting a member
//!
//! ## Queries
//! - Get / list members with effective status
//! - Members expiring soon

mod delete_member;
mod edit_member;
mod queries;
mod register_member;

// Commands
pub use delete_member::{DeleteMemberCommand, DeleteMemberHandler};
pub use edit_member::{EditMemberCommand, EditMemberHandler};
pub use register_member::{RegisterMemberCommand, RegisterMemberHandler};

// Queries
pub use queries::{
    GetMemberHandler, GetMemberQuery, ListExpiringMembersHandler, ListExpiringMembersQuery,
    ListMembersHandler, MemberView, DEFAULT_EXPIRING_DAYS, MAX_EXPIRING_DAYS,
};
