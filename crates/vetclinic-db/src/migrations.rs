//! # Database Migrations
//!
//! Embedded SQL migrations for the clinic schema.
//!
//! The `sqlx::migrate!()` macro embeds every SQL file from
//! `migrations/sqlite/` into the binary at compile time; applied migrations
//! are tracked in the `_sqlx_migrations` ledger table, which makes schema
//! setup idempotent: running it twice yields an identical table set.
//!
//! Migrations are additive only - columns are added with defaults, tables
//! are never dropped or renamed, so no upgrade loses data.
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNNN_description.sql`
//! 3. Never modify an existing migration - always add a new one

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the `migrations/sqlite` directory:
///
/// ```text
/// migrations/sqlite/
/// ├── 0001_initial_schema.sql      # accounts, inventory, appointments, sales
/// ├── 0002_inventory_details.sql   # brand/animal_type/dosage/expiration columns
/// └── 0003_appointment_totals.sql  # total_amount column
/// ```
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations in order.
///
/// Idempotent and transactional: each migration runs in its own transaction
/// and is recorded with its checksum, so reruns skip applied steps.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns `(total_migrations, applied_migrations)` for diagnostics.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}
