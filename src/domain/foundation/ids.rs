//! Strongly-typed identifier value objects.
//!
//! Every row key is a UUID wrapped in its own type so a `PlanId` can never be
//! passed where a `MemberId` is expected. `SubjectId` is the exception: it is
//! whatever string the identity provider puts in `sub`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Declares a UUID-backed identifier with generation, parsing and display.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

uuid_id! {
    /// A subscribing member.
    MemberId
}

uuid_id! {
    /// A catalogue plan.
    PlanId
}

uuid_id! {
    /// A ledger entry.
    PaymentId
}

uuid_id! {
    /// A back-office operator (admin or staff).
    OperatorId
}

/// Subject identifier issued by the identity provider (the `sub` claim).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    /// Rejects blank subjects.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("subject"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_differ() {
        assert_ne!(MemberId::new(), MemberId::new());
        assert_ne!(OperatorId::default(), OperatorId::default());
    }

    #[test]
    fn plan_id_parses_from_string() {
        let uuid = Uuid::new_v4();
        let id: PlanId = uuid.to_string().parse().unwrap();
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn payment_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<PaymentId>().is_err());
    }

    #[test]
    fn member_id_serializes_transparently() {
        let uuid = Uuid::new_v4();
        let id: MemberId = uuid.into();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }

    #[test]
    fn subject_id_rejects_blank() {
        assert!(SubjectId::new("").is_err());
        assert!(SubjectId::new("   ").is_err());
    }

    #[test]
    fn subject_id_accepts_value() {
        let id = SubjectId::new("auth0|abc").unwrap();
        assert_eq!(id.as_str(), "auth0|abc");
        assert_eq!(id.to_string(), "auth0|abc");
    }
}
