//! # Seeding
//!
//! Default data inserted at setup time: two starter accounts and the static
//! inventory catalog.
//!
//! Seeding is safe to run on every process start:
//! - accounts are inserted only when their username is absent;
//! - the catalog is inserted only into an empty inventory table, so manual
//!   edits and additions survive restarts. [`reset_catalog`] is the explicit
//!   destructive variant that clears and repopulates.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::catalog::CATALOG;
use crate::error::DbResult;
use crate::repository::inventory::InventoryLedger;
use vetclinic_core::Role;

/// Default account credentials created on first run.
const DEFAULT_ACCOUNTS: &[(&str, &str, Role)] = &[
    ("admin", "admin123", Role::Admin),
    ("staff", "staff123", Role::Staff),
];

/// Inserts the default admin and staff accounts if their usernames are
/// absent. Never touches existing accounts; running twice inserts nothing.
pub async fn seed_default_accounts(pool: &SqlitePool) -> DbResult<u64> {
    let mut inserted = 0;

    for (username, password, role) in DEFAULT_ACCOUNTS {
        let exists: Option<i64> =
            sqlx::query_scalar("SELECT id FROM accounts WHERE username = ?1")
                .bind(username)
                .fetch_optional(pool)
                .await?;

        if exists.is_some() {
            debug!(username, "Account already present, skipping");
            continue;
        }

        sqlx::query("INSERT INTO accounts (username, password, role) VALUES (?1, ?2, ?3)")
            .bind(username)
            .bind(password)
            .bind(role)
            .execute(pool)
            .await?;
        inserted += 1;
        info!(username, "Seeded default account");
    }

    Ok(inserted)
}

/// Populates the inventory from the static catalog, but only when the table
/// is empty. Returns the number of items inserted (0 when skipped).
pub async fn seed_catalog(pool: &SqlitePool) -> DbResult<u64> {
    let ledger = InventoryLedger::new(pool.clone());

    let existing = ledger.count().await?;
    if existing > 0 {
        debug!(existing, "Inventory not empty, catalog seeding skipped");
        return Ok(0);
    }

    let mut inserted = 0;
    for entry in CATALOG {
        ledger.insert(&entry.to_new_item()).await?;
        inserted += 1;
    }

    info!(inserted, "Seeded inventory catalog");
    Ok(inserted)
}

/// Clears the inventory and repopulates it from the static catalog.
///
/// Destructive: manually added or edited items are lost. Kept as an explicit
/// operator action; startup seeding uses [`seed_catalog`] instead.
pub async fn reset_catalog(pool: &SqlitePool) -> DbResult<u64> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM inventory").execute(&mut *tx).await?;

    let mut inserted = 0;
    for entry in CATALOG {
        let item = entry.to_new_item();
        sqlx::query(
            r#"
            INSERT INTO inventory
                (name, price, stock, category, brand, animal_type, dosage, expiration_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&item.name)
        .bind(item.price_centavos)
        .bind(item.stock)
        .bind(&item.category)
        .bind(&item.brand)
        .bind(&item.animal_type)
        .bind(&item.dosage)
        .bind(&item.expiration_date)
        .execute(&mut *tx)
        .await?;
        inserted += 1;
    }

    tx.commit().await?;

    info!(inserted, "Reset inventory catalog");
    Ok(inserted)
}

// =============================================================================
// Unit Tests
// =============================================================================
