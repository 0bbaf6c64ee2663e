//! Transition table contract for status enums.

use super::ValidationError;

/// A status enum with a declared transition table.
///
/// `transition_to` is the only way lifecycle code should move between
/// statuses, so an illegal move surfaces as a `ValidationError` on `status`
/// instead of silently overwriting the field.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Every status reachable in one step from `self`.
    fn valid_transitions(&self) -> Vec<Self>;

    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if !self.can_transition_to(&target) {
            return Err(ValidationError::invalid_format(
                "status",
                format!("cannot move from {:?} to {:?}", self, target),
            ));
        }
        Ok(target)
    }

    /// No outgoing transitions.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
