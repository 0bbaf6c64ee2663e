//! PostgreSQL implementation of PlanRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, PlanId};
use crate::domain::membership::Plan;
use crate::ports::PlanRepository;

use super::rows::{db_error, unique_violation, PlanRow, PLAN_COLUMNS};

pub struct PostgresPlanRepository {
    pool: PgPool,
}

impl PostgresPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(plan: &Plan, context: &str, e: sqlx::Error) -> DomainError {
    match unique_violation(&e).as_deref() {
        Some("plans_name_key") => DomainError::new(ErrorCode::DuplicatePlanName, "Plan name taken")
            .with_detail("name", plan.name.clone()),
        _ => db_error(context, e),
    }
}

#[async_trait]
impl PlanRepository for PostgresPlanRepository {
    async fn insert(&self, plan: &Plan) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO plans (
                id, name, duration, price_cents, description, is_active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(plan.id.as_uuid())
        .bind(&plan.name)
        .bind(plan.duration.as_str())
        .bind(plan.price.cents())
        .bind(&plan.description)
        .bind(plan.is_active)
        .bind(plan.created_at.as_datetime())
        .bind(plan.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(plan, "Failed to insert plan", e))?;

        Ok(())
    }

    async fn update(&self, plan: &Plan) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE plans SET
                name = $2,
                duration = $3,
                price_cents = $4,
                description = $5,
                is_active = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(plan.id.as_uuid())
        .bind(&plan.name)
        .bind(plan.duration.as_str())
        .bind(plan.price.cents())
        .bind(&plan.description)
        .bind(plan.is_active)
        .bind(plan.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(plan, "Failed to update plan", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::PlanNotFound, "Plan not found")
                .with_detail("plan_id", plan.id.to_string()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &PlanId) -> Result<Option<Plan>, DomainError> {
        let sql = format!("SELECT {} FROM plans WHERE id = $1", PLAN_COLUMNS);
        sqlx::query_as::<_, PlanRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find plan", e))?
            .map(Plan::try_from)
            .transpose()
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Plan>, DomainError> {
        let sql = format!(
            "SELECT {} FROM plans WHERE is_active OR NOT $1 ORDER BY price_cents ASC, name ASC",
            PLAN_COLUMNS
        );
        sqlx::query_as::<_, PlanRow>(&sql)
            .bind(active_only)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list plans", e))?
            .into_iter()
            .map(Plan::try_from)
            .collect()
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM plans")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count plans", e))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
