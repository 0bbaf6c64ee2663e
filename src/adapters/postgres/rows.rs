//! Row types and conversions shared by the PostgreSQL adapters.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::domain::access::{Operator, Role};
use crate::domain::foundation::{
    DomainError, ErrorCode, MemberId, Money, OperatorId, PaymentId, PlanId, SubjectId, Timestamp,
};
use crate::domain::membership::{Member, MemberProfile, MemberStatus, Plan, PlanDuration};
use crate::domain::payment::{GatewayReference, Payment, PaymentMethod, PaymentStatus};

pub(super) const MEMBER_COLUMNS: &str = "id, first_name, last_name, email, phone, address, \
     current_plan_id, status, start_date, end_date, version, created_at, updated_at";

pub(super) const PLAN_COLUMNS: &str =
    "id, name, duration, price_cents, description, is_active, created_at, updated_at";

pub(super) const PAYMENT_COLUMNS: &str = "id, member_id, plan_id, amount_cents, status, method, \
     transaction_id, gateway_order_id, gateway_payment_id, payment_date";

pub(super) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("{}: {}", context, e))
}

/// Name of the violated unique constraint, if `e` is one.
pub(super) fn unique_violation(e: &sqlx::Error) -> Option<String> {
    match e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            db_err.constraint().map(str::to_string)
        }
        _ => None,
    }
}

fn corrupt(what: &str, value: impl std::fmt::Display) -> DomainError {
    DomainError::database(format!("Invalid {} in database: {}", what, value))
}

fn parse<T: FromStr>(what: &str, value: &str) -> Result<T, DomainError> {
    value.parse().map_err(|_| corrupt(what, value))
}

// ════════════════════════════════════════════════════════════════════════════
// Members
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, sqlx::FromRow)]
pub(super) struct MemberRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    current_plan_id: Option<Uuid>,
    status: String,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for Member {
    type Error = DomainError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(Member {
            id: MemberId::from_uuid(row.id),
            profile: MemberProfile {
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
                phone: row.phone,
                address: row.address,
            },
            current_plan: row.current_plan_id.map(PlanId::from_uuid),
            status: parse::<MemberStatus>("member status", &row.status)?,
            start_date: row.start_date.map(Timestamp::from_datetime),
            end_date: row.end_date.map(Timestamp::from_datetime),
            version: u64::try_from(row.version).map_err(|_| corrupt("member version", row.version))?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

pub(super) fn version_param(version: u64) -> Result<i64, DomainError> {
    i64::try_from(version).map_err(|_| DomainError::database("member version overflow"))
}

pub(super) fn duplicate_email(email: &str) -> DomainError {
    DomainError::new(ErrorCode::DuplicateEmail, "Email already registered").with_detail("email", email)
}

/// Compare-and-swap write of `member` at `member.version`.
///
/// Returns the stored copy, or `None` when no row matched the id and version.
pub(super) async fn write_member(
    conn: &mut PgConnection,
    member: &Member,
) -> Result<Option<Member>, DomainError> {
    let sql = format!(
        r#"
        UPDATE members SET
            first_name = $3,
            last_name = $4,
            email = $5,
            phone = $6,
            address = $7,
            current_plan_id = $8,
            status = $9,
            start_date = $10,
            end_date = $11,
            updated_at = $12,
            version = version + 1
        WHERE id = $1 AND version = $2
        RETURNING {}
        "#,
        MEMBER_COLUMNS
    );

    let row: Option<MemberRow> = sqlx::query_as(&sql)
        .bind(member.id.as_uuid())
        .bind(version_param(member.version)?)
        .bind(&member.profile.first_name)
        .bind(&member.profile.last_name)
        .bind(&member.profile.email)
        .bind(&member.profile.phone)
        .bind(&member.profile.address)
        .bind(member.current_plan.map(|p| *p.as_uuid()))
        .bind(member.status.as_str())
        .bind(member.start_date.map(|t| *t.as_datetime()))
        .bind(member.end_date.map(|t| *t.as_datetime()))
        .bind(member.updated_at.as_datetime())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| match unique_violation(&e).as_deref() {
            Some("members_email_key") => duplicate_email(&member.profile.email),
            _ => db_error("Failed to update member", e),
        })?;

    row.map(Member::try_from).transpose()
}

/// Explains a CAS miss: the member is gone, or someone else wrote first.
pub(super) async fn cas_miss(conn: &mut PgConnection, member: &Member) -> DomainError {
    let exists = sqlx::query_scalar::<_, i64>("SELECT version FROM members WHERE id = $1")
        .bind(member.id.as_uuid())
        .fetch_optional(&mut *conn)
        .await;

    match exists {
        Ok(None) => DomainError::new(ErrorCode::MemberNotFound, "Member not found")
            .with_detail("member_id", member.id.to_string()),
        Ok(Some(stored)) => DomainError::conflict(format!(
            "member {} is at version {}, write was based on {}",
            member.id, stored, member.version
        )),
        Err(e) => db_error("Failed to read member version", e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Plans
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, sqlx::FromRow)]
pub(super) struct PlanRow {
    id: Uuid,
    name: String,
    duration: String,
    price_cents: i64,
    description: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PlanRow> for Plan {
    type Error = DomainError;

    fn try_from(row: PlanRow) -> Result<Self, Self::Error> {
        Ok(Plan {
            id: PlanId::from_uuid(row.id),
            name: row.name,
            duration: parse::<PlanDuration>("plan duration", &row.duration)?,
            price: Money::from_cents(row.price_cents).map_err(|_| corrupt("plan price", row.price_cents))?,
            description: row.description,
            is_active: row.is_active,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Payments
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, sqlx::FromRow)]
pub(super) struct PaymentRow {
    id: Uuid,
    member_id: Uuid,
    plan_id: Uuid,
    amount_cents: i64,
    status: String,
    method: String,
    transaction_id: Option<String>,
    gateway_order_id: Option<String>,
    gateway_payment_id: Option<String>,
    payment_date: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let gateway = match (row.gateway_order_id, row.gateway_payment_id) {
            (Some(order_id), Some(payment_id)) => Some(GatewayReference { order_id, payment_id }),
            _ => None,
        };
        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            member_id: MemberId::from_uuid(row.member_id),
            plan_id: PlanId::from_uuid(row.plan_id),
            amount: Money::from_cents(row.amount_cents)
                .map_err(|_| corrupt("payment amount", row.amount_cents))?,
            status: parse::<PaymentStatus>("payment status", &row.status)?,
            payment_date: Timestamp::from_datetime(row.payment_date),
            transaction_id: row.transaction_id,
            method: parse::<PaymentMethod>("payment method", &row.method)?,
            gateway,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Operators
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, sqlx::FromRow)]
pub(super) struct OperatorRow {
    id: Uuid,
    subject: String,
    email: String,
    display_name: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OperatorRow> for Operator {
    type Error = DomainError;

    fn try_from(row: OperatorRow) -> Result<Self, Self::Error> {
        Ok(Operator {
            id: OperatorId::from_uuid(row.id),
            subject: SubjectId::new(row.subject).map_err(|e| corrupt("operator subject", e))?,
            email: row.email,
            display_name: row.display_name,
            role: parse::<Role>("operator role", &row.role)?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}
