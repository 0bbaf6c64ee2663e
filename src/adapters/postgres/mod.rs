//! PostgreSQL adapters - Database implementations for the persistence ports.
//!
//! - `PostgresMemberRepository` - Members with versioned CAS writes
//! - `PostgresPlanRepository` - Plan catalogue
//! - `PostgresPaymentLedger` - Payments, appended in one transaction with renewal
//! - `PostgresOperatorDirectory` - Back-office operators

mod member_repository;
mod operator_directory;
mod payment_ledger;
mod plan_repository;
mod rows;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub use member_repository::PostgresMemberRepository;
pub use operator_directory::PostgresOperatorDirectory;
pub use payment_ledger::PostgresPaymentLedger;
pub use plan_repository::PostgresPlanRepository;

/// Opens a connection pool.
pub async fn connect(
    url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(url)
        .await
}

/// Applies the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}
