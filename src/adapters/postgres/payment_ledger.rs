//! PostgreSQL implementation of PaymentLedger.
//!
//! The payment insert and the member renewal share one transaction. If the
//! member's version moved, the transaction is rolled back and the payment row
//! never becomes visible.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId};
use crate::domain::membership::Member;
use crate::domain::payment::Payment;
use crate::ports::PaymentLedger;

use super::rows::{cas_miss, db_error, unique_violation, write_member, PaymentRow, PAYMENT_COLUMNS};

pub struct PostgresPaymentLedger {
    pool: PgPool,
}

impl PostgresPaymentLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentLedger for PostgresPaymentLedger {
    async fn append(
        &self,
        payment: &Payment,
        renewed: Option<&Member>,
    ) -> Result<Option<Member>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO payments (
                id, member_id, plan_id, amount_cents, status, method,
                transaction_id, gateway_order_id, gateway_payment_id, payment_date
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.member_id.as_uuid())
        .bind(payment.plan_id.as_uuid())
        .bind(payment.amount.cents())
        .bind(payment.status.as_str())
        .bind(payment.method.as_str())
        .bind(&payment.transaction_id)
        .bind(payment.gateway.as_ref().map(|g| g.order_id.clone()))
        .bind(payment.gateway.as_ref().map(|g| g.payment_id.clone()))
        .bind(payment.payment_date.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| match unique_violation(&e).as_deref() {
            Some("payments_transaction_id_key") => {
                DomainError::new(ErrorCode::DuplicateTransaction, "Transaction already recorded")
                    .with_detail("transaction_id", payment.transaction_id.clone().unwrap_or_default())
            }
            _ => db_error("Failed to insert payment", e),
        })?;

        let stored = match renewed {
            Some(member) => match write_member(&mut tx, member).await? {
                Some(stored) => Some(stored),
                None => {
                    // Dropping `tx` rolls the payment back.
                    return Err(cas_miss(&mut tx, member).await);
                }
            },
            None => None,
        };

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit payment", e))?;
        Ok(stored)
    }

    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Payment>, DomainError> {
        let sql = format!("SELECT {} FROM payments WHERE transaction_id = $1", PAYMENT_COLUMNS);
        sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(transaction_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find payment", e))?
            .map(Payment::try_from)
            .transpose()
    }

    async fn list_for_member(&self, member_id: &MemberId) -> Result<Vec<Payment>, DomainError> {
        let sql = format!(
            "SELECT {} FROM payments WHERE member_id = $1 ORDER BY payment_date DESC",
            PAYMENT_COLUMNS
        );
        sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(member_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list payments", e))?
            .into_iter()
            .map(Payment::try_from)
            .collect()
    }

    async fn list_all(&self) -> Result<Vec<Payment>, DomainError> {
        let sql = format!("SELECT {} FROM payments ORDER BY payment_date DESC", PAYMENT_COLUMNS);
        sqlx::query_as::<_, PaymentRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list payments", e))?
            .into_iter()
            .map(Payment::try_from)
            .collect()
    }
}
