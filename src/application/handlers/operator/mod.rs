//! Operator handlers - first-login sync, lookup and operation authorization.

mod authorize_operation;
mod current_operator;
mod sync_operator;

pub use authorize_operation::{AuthorizeOperationHandler, PROFILE_NOT_FOUND};
pub use current_operator::CurrentOperatorHandler;
pub use sync_operator::SyncOperatorHandler;
