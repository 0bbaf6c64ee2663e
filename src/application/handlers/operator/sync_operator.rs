//! SyncOperatorHandler - Creates the operator record on first login.

use std::sync::Arc;

use tracing::info;

use crate::domain::access::Operator;
use crate::domain::foundation::{AuthenticatedUser, ErrorCode};
use crate::domain::membership::MembershipError;
use crate::ports::{Clock, OperatorDirectory};

/// Handler for operator sync.
///
/// Returns the existing operator on later logins. The role is fixed at
/// provisioning time; changing `admin_emails` does not touch existing
/// operators.
pub struct SyncOperatorHandler {
    operators: Arc<dyn OperatorDirectory>,
    clock: Arc<dyn Clock>,
    admin_emails: Vec<String>,
}

impl SyncOperatorHandler {
    pub fn new(
        operators: Arc<dyn OperatorDirectory>,
        clock: Arc<dyn Clock>,
        admin_emails: Vec<String>,
    ) -> Self {
        Self {
            operators,
            clock,
            admin_emails,
        }
    }

    pub async fn handle(&self, user: &AuthenticatedUser) -> Result<Operator, MembershipError> {
        if let Some(existing) = self.operators.find_by_subject(&user.subject).await? {
            return Ok(existing);
        }

        let operator = Operator::provision(user, &self.admin_emails, self.clock.now());
        match self.operators.insert(&operator).await {
            Ok(()) => {
                info!(
                    operator_id = %operator.id,
                    role = %operator.role,
                    "Operator provisioned"
                );
                Ok(operator)
            }
            // A concurrent first login won the insert.
            Err(e) if e.code == ErrorCode::DuplicateSubject => self
                .operators
                .find_by_subject(&user.subject)
                .await?
                .ok_or_else(|| MembershipError::infrastructure("operator vanished after insert race")),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, InMemoryStore};
    use crate::application::handlers::test_support::ts;
    use crate::domain::access::Role;
    use crate::domain::foundation::{DomainError, SubjectId};
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn user(sub: &str, email: &str) -> AuthenticatedUser {
        AuthenticatedUser::new(SubjectId::new(sub).unwrap(), email, None)
    }

    fn handler(store: Arc<InMemoryStore>) -> SyncOperatorHandler {
        SyncOperatorHandler::new(
            store,
            Arc::new(FixedClock::at(ts(2024, 1, 1))),
            vec!["owner@example.com".to_string()],
        )
    }

    #[tokio::test]
    async fn first_login_provisions_role_from_admin_list() {
        let store = Arc::new(InMemoryStore::new());
        let h = handler(store.clone());

        let admin = h.handle(&user("sub-owner", "Owner@Example.com")).await.unwrap();
        let staff = h.handle(&user("sub-desk", "desk@example.com")).await.unwrap();

        assert_eq!(admin.role, Role::Admin);
        assert_eq!(staff.role, Role::Staff);
        assert_eq!(staff.display_name, "desk");
    }

    #[tokio::test]
    async fn later_logins_return_existing_operator() {
        let store = Arc::new(InMemoryStore::new());
        let h = handler(store.clone());
        let first = h.handle(&user("sub-desk", "desk@example.com")).await.unwrap();

        let second = h.handle(&user("sub-desk", "desk@example.com")).await.unwrap();

        assert_eq!(first.id, second.id);
    }

    /// Directory that hides the operator from the first lookup, as if a
    /// concurrent login inserted it in between.
    struct RacingDirectory {
        inner: InMemoryStore,
        lookups: Mutex<u32>,
    }

    #[async_trait]
    impl OperatorDirectory for RacingDirectory {
        async fn find_by_subject(&self, subject: &SubjectId) -> Result<Option<Operator>, DomainError> {
            let first_lookup = {
                let mut lookups = self.lookups.lock().unwrap();
                *lookups += 1;
                *lookups == 1
            };
            if first_lookup {
                return Ok(None);
            }
            self.inner.find_by_subject(subject).await
        }

        async fn insert(&self, operator: &Operator) -> Result<(), DomainError> {
            OperatorDirectory::insert(&self.inner, operator).await
        }
    }

    #[tokio::test]
    async fn lost_insert_race_returns_winner() {
        let winner_user = user("sub-desk", "desk@example.com");
        let winner = Operator::provision(&winner_user, &[], ts(2024, 1, 1));
        let directory = RacingDirectory {
            inner: InMemoryStore::new(),
            lookups: Mutex::new(0),
        };
        OperatorDirectory::insert(&directory.inner, &winner).await.unwrap();

        let synced = SyncOperatorHandler::new(
            Arc::new(directory),
            Arc::new(FixedClock::at(ts(2024, 1, 1))),
            vec![],
        )
        .handle(&winner_user)
        .await
        .unwrap();

        assert_eq!(synced.id, winner.id);
    }
}
