//! Operator entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthenticatedUser, OperatorId, SubjectId, Timestamp};

use super::Role;

/// An authenticated back-office user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub id: OperatorId,
    /// Identity-provider subject; unique.
    pub subject: SubjectId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub created_at: Timestamp,
}

impl Operator {
    /// Creates the operator record for a first login.
    ///
    /// Callers whose email appears in `admin_emails` (case-insensitive) start
    /// as admin; everyone else starts as staff.
    pub fn provision(user: &AuthenticatedUser, admin_emails: &[String], now: Timestamp) -> Self {
        let email = user.email.trim().to_lowercase();
        let role = if admin_emails.iter().any(|a| a.trim().eq_ignore_ascii_case(&email)) {
            Role::Admin
        } else {
            Role::Staff
        };
        let display_name = match user.display_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => email.split('@').next().unwrap_or_default().to_string(),
        };

        Self {
            id: OperatorId::new(),
            subject: user.subject.clone(),
            email,
            display_name,
            role,
            created_at: now,
        }
    }
}
