//! PostgreSQL implementation of MemberRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, MemberId, Timestamp};
use crate::domain::membership::Member;
use crate::ports::MemberRepository;

use super::rows::{
    cas_miss, db_error, duplicate_email, unique_violation, version_param, write_member, MemberRow,
    MEMBER_COLUMNS,
};

/// PostgreSQL implementation of the MemberRepository port.
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_all(&self, sql: &str, binds: &[Timestamp]) -> Result<Vec<Member>, DomainError> {
        let mut query = sqlx::query_as::<_, MemberRow>(sql);
        for ts in binds {
            query = query.bind(*ts.as_datetime());
        }
        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list members", e))?
            .into_iter()
            .map(Member::try_from)
            .collect()
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn insert(&self, member: &Member) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO members (
                id, first_name, last_name, email, phone, address, current_plan_id,
                status, start_date, end_date, version, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(&member.profile.first_name)
        .bind(&member.profile.last_name)
        .bind(&member.profile.email)
        .bind(&member.profile.phone)
        .bind(&member.profile.address)
        .bind(member.current_plan.map(|p| *p.as_uuid()))
        .bind(member.status.as_str())
        .bind(member.start_date.map(|t| *t.as_datetime()))
        .bind(member.end_date.map(|t| *t.as_datetime()))
        .bind(version_param(member.version)?)
        .bind(member.created_at.as_datetime())
        .bind(member.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match unique_violation(&e).as_deref() {
            Some("members_email_key") => duplicate_email(&member.profile.email),
            _ => db_error("Failed to insert member", e),
        })?;

        Ok(())
    }

    async fn update(&self, member: &Member) -> Result<Member, DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| db_error("Failed to acquire connection", e))?;

        match write_member(&mut conn, member).await? {
            Some(stored) => Ok(stored),
            None => Err(cas_miss(&mut conn, member).await),
        }
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        let sql = format!("SELECT {} FROM members WHERE id = $1", MEMBER_COLUMNS);
        sqlx::query_as::<_, MemberRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find member", e))?
            .map(Member::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, DomainError> {
        let sql = format!("SELECT {} FROM members WHERE email = $1", MEMBER_COLUMNS);
        sqlx::query_as::<_, MemberRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find member", e))?
            .map(Member::try_from)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Member>, DomainError> {
        let sql = format!("SELECT {} FROM members ORDER BY created_at DESC", MEMBER_COLUMNS);
        self.fetch_all(&sql, &[]).await
    }

    async fn find_lapsed(&self, now: Timestamp) -> Result<Vec<Member>, DomainError> {
        let sql = format!(
            "SELECT {} FROM members WHERE status = 'active' AND end_date < $1",
            MEMBER_COLUMNS
        );
        self.fetch_all(&sql, &[now]).await
    }

    async fn expire_if_lapsed(
        &self,
        id: &MemberId,
        expected_version: u64,
        now: Timestamp,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE members SET
                status = 'expired',
                updated_at = $3,
                version = version + 1
            WHERE id = $1
              AND version = $2
              AND status = 'active'
              AND end_date < $3
            "#,
        )
        .bind(id.as_uuid())
        .bind(version_param(expected_version)?)
        .bind(now.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to expire member", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_expiring(
        &self,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<Member>, DomainError> {
        let sql = format!(
            "SELECT {} FROM members \
             WHERE status = 'active' AND end_date >= $1 AND end_date <= $2 \
             ORDER BY end_date ASC",
            MEMBER_COLUMNS
        );
        self.fetch_all(&sql, &[from, until]).await
    }

    async fn delete(&self, id: &MemberId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete member", e))?;
        Ok(result.rows_affected() == 1)
    }
}
