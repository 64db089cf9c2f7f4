//! # Inventory Ledger
//!
//! Database operations for inventory items: listing, search, CRUD, and
//! stock adjustment.
//!
//! Stock changes are expressed as deltas (`stock = stock - delta`) rather
//! than absolute writes, and consuming deltas carry a conditional guard
//! (`WHERE stock >= delta`) so no operation can drive stock negative.

use sqlx::SqlitePool;
use tracing::{debug, error};

use crate::error::{DbError, DbResult};
use vetclinic_core::{CoreError, InventoryItem, NewInventoryItem};

/// Column list with centavo aliases, shared by every item SELECT.
const ITEM_COLUMNS: &str = "id, name, price AS price_centavos, stock, category, \
     brand, animal_type, dosage, expiration_date";

/// Manager for inventory rows. Sole owner of inventory mutations.
#[derive(Debug, Clone)]
pub struct InventoryLedger {
    pool: SqlitePool,
}

impl InventoryLedger {
    /// Creates a new InventoryLedger.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryLedger { pool }
    }

    /// Lists all items ordered by (category, name).
    pub async fn list(&self) -> DbResult<Vec<InventoryItem>> {
        let items = sqlx::query_as::<_, InventoryItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM inventory ORDER BY category, name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Searches items whose name or category contains `term`
    /// (case-insensitive substring), ordered by (category, name).
    pub async fn search(&self, term: &str) -> DbResult<Vec<InventoryItem>> {
        let pattern = format!("%{}%", term.trim());
        debug!(term = %term, "Searching inventory");

        let items = sqlx::query_as::<_, InventoryItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM inventory \
             WHERE name LIKE ?1 OR category LIKE ?1 \
             ORDER BY category, name"
        ))
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets an item by its id.
    pub async fn get(&self, id: i64) -> DbResult<Option<InventoryItem>> {
        let item = sqlx::query_as::<_, InventoryItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM inventory WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts a new item and returns its assigned id.
    pub async fn insert(&self, item: &NewInventoryItem) -> DbResult<i64> {
        debug!(name = %item.name, "Inserting inventory item");

        let result = sqlx::query(
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
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Updates an existing item (full replace by id).
    pub async fn update(&self, item: &InventoryItem) -> DbResult<()> {
        debug!(id = item.id, "Updating inventory item");

        let result = sqlx::query(
            r#"
            UPDATE inventory SET
                name = ?2,
                price = ?3,
                stock = ?4,
                category = ?5,
                brand = ?6,
                animal_type = ?7,
                dosage = ?8,
                expiration_date = ?9
            WHERE id = ?1
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(item.price_centavos)
        .bind(item.stock)
        .bind(&item.category)
        .bind(&item.brand)
        .bind(&item.animal_type)
        .bind(&item.dosage)
        .bind(&item.expiration_date)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("InventoryItem", item.id));
        }

        Ok(())
    }

    /// Deletes an item by id.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting inventory item");

        let result = sqlx::query("DELETE FROM inventory WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("InventoryItem", id));
        }

        Ok(())
    }

    /// Applies `stock = stock - delta`.
    ///
    /// A positive delta consumes stock and is guarded: the update only
    /// applies while `stock >= delta`, otherwise the call fails with
    /// `InsufficientStock` and the row is untouched. A negative delta
    /// restocks unconditionally.
    pub async fn adjust_stock(&self, id: i64, delta: i64) -> DbResult<()> {
        debug!(id, delta, "Adjusting stock");

        if delta > 0 {
            let result = sqlx::query(
                "UPDATE inventory SET stock = stock - ?2 WHERE id = ?1 AND stock >= ?2",
            )
            .bind(id)
            .bind(delta)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                // Distinguish a missing row from a failed guard.
                return match self.get(id).await? {
                    None => Err(DbError::not_found("InventoryItem", id)),
                    Some(item) => {
                        error!(
                            id,
                            item = %item.name,
                            available = item.stock,
                            requested = delta,
                            "Stock adjustment rejected"
                        );
                        Err(DbError::Domain(CoreError::InsufficientStock {
                            name: item.name,
                            available: item.stock,
                            requested: delta,
                        }))
                    }
                };
            }
        } else {
            let result = sqlx::query("UPDATE inventory SET stock = stock - ?2 WHERE id = ?1")
                .bind(id)
                .bind(delta)
                .execute(&self.pool)
                .await?;

            if result.rows_affected() == 0 {
                return Err(DbError::not_found("InventoryItem", id));
            }
        }

        Ok(())
    }

    /// Counts inventory rows.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
