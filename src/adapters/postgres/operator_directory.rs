//! PostgreSQL implementation of OperatorDirectory.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::access::Operator;
use crate::domain::foundation::{DomainError, ErrorCode, SubjectId};
use crate::ports::OperatorDirectory;

use super::rows::{db_error, unique_violation, OperatorRow};

pub struct PostgresOperatorDirectory {
    pool: PgPool,
}

impl PostgresOperatorDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OperatorDirectory for PostgresOperatorDirectory {
    async fn find_by_subject(&self, subject: &SubjectId) -> Result<Option<Operator>, DomainError> {
        sqlx::query_as::<_, OperatorRow>(
            "SELECT id, subject, email, display_name, role, created_at FROM operators WHERE subject = $1",
        )
        .bind(subject.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find operator", e))?
        .map(Operator::try_from)
        .transpose()
    }

    async fn insert(&self, operator: &Operator) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO operators (id, subject, email, display_name, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(operator.id.as_uuid())
        .bind(operator.subject.as_str())
        .bind(&operator.email)
        .bind(&operator.display_name)
        .bind(operator.role.as_str())
        .bind(operator.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match unique_violation(&e).as_deref() {
            Some("operators_subject_key") => {
                DomainError::new(ErrorCode::DuplicateSubject, "Operator already exists")
                    .with_detail("subject", operator.subject.to_string())
            }
            _ => db_error("Failed to insert operator", e),
        })?;

        Ok(())
    }
}
