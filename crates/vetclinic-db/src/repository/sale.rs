//! # Sales Register
//!
//! Commits point-of-sale transactions and answers sales reports.
//!
//! ## Checkout Settlement
//! ```text
//! Cart lines ──► record_sale(txn_id, lines, total, method, customer)
//!                     │
//!                     ▼  one transaction
//!                ┌────────────────────────────────────────────┐
//!                │ per line:                                  │
//!                │   INSERT sales row (shared txn id + total) │
//!                │   UPDATE inventory                         │
//!                │     SET stock = stock - qty                │
//!                │     WHERE id = ? AND stock >= qty          │
//!                │   guard failed? ──► abort whole sale       │
//!                └────────────────────────────────────────────┘
//!                     │
//!                     ▼
//!                COMMIT — rows and stock move together, or not at all
//! ```
//! The conditional guard runs inside the same transaction as the inserts,
//! so no stock check can go stale between reading and writing: a sale that
//! would drive any line's stock below zero is rejected in full.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, error};

use crate::error::{DbError, DbResult};
use vetclinic_core::{CartLine, CoreError, Money, PaymentMethod, SaleRecord, ValidationError};

/// Sale row column list with centavo aliases.
const SALE_COLUMNS: &str = "id, transaction_id, item_id, item_name, quantity, \
     price AS price_centavos, subtotal AS subtotal_centavos, \
     total_amount AS total_centavos, payment_method, customer_name, sale_date";

/// Manager for sale rows and checkout settlement.
#[derive(Debug, Clone)]
pub struct SalesRegister {
    pool: SqlitePool,
}

impl SalesRegister {
    /// Creates a new SalesRegister.
    pub fn new(pool: SqlitePool) -> Self {
        SalesRegister { pool }
    }

    /// Commits a checkout: persists one sale row per cart line and
    /// decrements the matching inventory stock, atomically.
    ///
    /// Fails without writing anything when:
    /// - `lines` is empty (`EmptyCart`)
    /// - `total` does not equal the sum of line subtotals (`TotalMismatch`)
    /// - any line references a missing item (`NotFound`)
    /// - any line's quantity exceeds the item's stock (`InsufficientStock`)
    pub async fn record_sale(
        &self,
        transaction_id: &str,
        lines: &[CartLine],
        total: Money,
        payment_method: PaymentMethod,
        customer_name: &str,
    ) -> DbResult<()> {
        if lines.is_empty() {
            return Err(DbError::Domain(CoreError::EmptyCart));
        }

        let computed: Money = lines.iter().map(|l| l.subtotal()).sum();
        if computed != total {
            return Err(DbError::Domain(CoreError::Validation(
                ValidationError::TotalMismatch {
                    stated: total.centavos(),
                    computed: computed.centavos(),
                },
            )));
        }

        debug!(
            transaction_id,
            lines = lines.len(),
            total = total.centavos(),
            %payment_method,
            "Recording sale"
        );

        let sale_date = Utc::now();
        let mut tx = self.pool.begin().await?;

        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO sales
                    (transaction_id, item_id, item_name, quantity, price, subtotal,
                     total_amount, payment_method, customer_name, sale_date)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
            )
            .bind(transaction_id)
            .bind(line.item_id)
            .bind(&line.name)
            .bind(line.quantity)
            .bind(line.price_centavos)
            .bind(line.subtotal().centavos())
            .bind(total.centavos())
            .bind(payment_method)
            .bind(customer_name)
            .bind(sale_date)
            .execute(&mut *tx)
            .await?;

            // Guarded decrement in the same transaction as the insert: the
            // whole sale aborts if any line cannot be covered by stock.
            let result = sqlx::query(
                "UPDATE inventory SET stock = stock - ?2 WHERE id = ?1 AND stock >= ?2",
            )
            .bind(line.item_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                let available: Option<i64> =
                    sqlx::query_scalar("SELECT stock FROM inventory WHERE id = ?1")
                        .bind(line.item_id)
                        .fetch_optional(&mut *tx)
                        .await?;

                // Dropping the transaction rolls back the rows inserted so far.
                return match available {
                    None => {
                        error!(transaction_id, item_id = line.item_id, "Sale aborted: item missing");
                        Err(DbError::not_found("InventoryItem", line.item_id))
                    }
                    Some(stock) => {
                        error!(
                            transaction_id,
                            item = %line.name,
                            available = stock,
                            requested = line.quantity,
                            "Sale aborted: insufficient stock"
                        );
                        Err(DbError::Domain(CoreError::InsufficientStock {
                            name: line.name.clone(),
                            available: stock,
                            requested: line.quantity,
                        }))
                    }
                };
            }
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Returns sale rows filtered by inclusive bounds on the sale timestamp,
    /// most recent first. `None` leaves that side unbounded.
    pub async fn report(
        &self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> DbResult<Vec<SaleRecord>> {
        let records = sqlx::query_as::<_, SaleRecord>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales \
             WHERE (?1 IS NULL OR sale_date >= ?1) \
               AND (?2 IS NULL OR sale_date <= ?2) \
             ORDER BY sale_date DESC"
        ))
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Returns every row of one transaction, in insertion order.
    pub async fn transaction(&self, transaction_id: &str) -> DbResult<Vec<SaleRecord>> {
        let records = sqlx::query_as::<_, SaleRecord>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE transaction_id = ?1 ORDER BY id"
        ))
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use vetclinic_core::{Cart, NewInventoryItem};

    async fn seed_item(db: &Database, name: &str, price_centavos: i64, stock: i64) -> i64 {
        db.inventory()
            .insert(&NewInventoryItem {
                name: name.to_string(),
                price_centavos,
                stock,
                category: "Dog Medicines".to_string(),
                brand: "Generic".to_string(),
                animal_type: "All".to_string(),
                dosage: "N/A".to_string(),
                expiration_date: "5 years".to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_checkout_settles_rows_and_stock() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let id = seed_item(&db, "Bandage", 15_000, 150).await;

        let mut cart = Cart::new();
        cart.add_line(id, "Bandage", Money::from_centavos(15_000), 3, "Dog Medicines")
            .unwrap();

        db.sales()
            .record_sale("TXN1", cart.lines(), cart.total(), PaymentMethod::Cash, "Walk-in Customer")
            .await
            .unwrap();

        let rows = db.sales().transaction("TXN1").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].subtotal().centavos(), 45_000);
        assert_eq!(rows[0].total().centavos(), 45_000);
        assert_eq!(rows[0].payment_method, PaymentMethod::Cash);
        assert_eq!(rows[0].customer_name, "Walk-in Customer");

        // Stock 150 → 147.
        let item = db.inventory().get(id).await.unwrap().unwrap();
        assert_eq!(item.stock, 147);
    }

    #[tokio::test]
    async fn test_rows_of_one_transaction_share_the_total() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let bandage = seed_item(&db, "Bandage", 15_000, 150).await;
        let amoxicillin = seed_item(&db, "Amoxicillin 500mg (tablet)", 2_500, 50).await;

        let mut cart = Cart::new();
        cart.add_line(bandage, "Bandage", Money::from_centavos(15_000), 2, "Dog Medicines")
            .unwrap();
        cart.add_line(amoxicillin, "Amoxicillin 500mg (tablet)", Money::from_centavos(2_500), 4, "Dog Medicines")
            .unwrap();

        db.sales()
            .record_sale("TXN2", cart.lines(), cart.total(), PaymentMethod::GCash, "Ana Cruz")
            .await
            .unwrap();

        let rows = db.sales().transaction("TXN2").await.unwrap();
        assert_eq!(rows.len(), 2);

        let sum: i64 = rows.iter().map(|r| r.subtotal_centavos).sum();
        assert_eq!(sum, 40_000);
        assert!(rows.iter().all(|r| r.total_centavos == sum));
    }

    #[tokio::test]
    async fn test_insufficient_stock_aborts_whole_sale() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let plentiful = seed_item(&db, "Bandage", 15_000, 150).await;
        let scarce = seed_item(&db, "Carprofen 100mg (tablet)", 3_500, 2).await;

        let mut cart = Cart::new();
        cart.add_line(plentiful, "Bandage", Money::from_centavos(15_000), 1, "Dog Medicines")
            .unwrap();
        cart.add_line(scarce, "Carprofen 100mg (tablet)", Money::from_centavos(3_500), 5, "Dog Medicines")
            .unwrap();

        let err = db
            .sales()
            .record_sale("TXN3", cart.lines(), cart.total(), PaymentMethod::Cash, "")
            .await
            .unwrap_err();
        assert!(err.is_insufficient_stock());

        // No partial commit: no rows, no stock movement on either item.
        assert!(db.sales().transaction("TXN3").await.unwrap().is_empty());
        assert_eq!(db.inventory().get(plentiful).await.unwrap().unwrap().stock, 150);
        assert_eq!(db.inventory().get(scarce).await.unwrap().unwrap().stock, 2);
    }

    #[tokio::test]
    async fn test_missing_item_aborts_whole_sale() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut cart = Cart::new();
        cart.add_line(999, "Phantom", Money::from_centavos(100), 1, "")
            .unwrap();

        let err = db
            .sales()
            .record_sale("TXN4", cart.lines(), cart.total(), PaymentMethod::Cash, "")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert!(db.sales().transaction("TXN4").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db
            .sales()
            .record_sale("TXN5", &[], Money::zero(), PaymentMethod::Cash, "")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::EmptyCart)));
    }

    #[tokio::test]
    async fn test_total_mismatch_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let id = seed_item(&db, "Bandage", 15_000, 150).await;

        let mut cart = Cart::new();
        cart.add_line(id, "Bandage", Money::from_centavos(15_000), 3, "")
            .unwrap();

        let err = db
            .sales()
            .record_sale("TXN6", cart.lines(), Money::from_centavos(1), PaymentMethod::Cash, "")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::Validation(ValidationError::TotalMismatch { .. }))
        ));
        assert_eq!(db.inventory().get(id).await.unwrap().unwrap().stock, 150);
    }

    #[tokio::test]
    async fn test_report_bounds_and_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let id = seed_item(&db, "Bandage", 15_000, 150).await;

        for txn in ["TXN-A", "TXN-B"] {
            let mut cart = Cart::new();
            cart.add_line(id, "Bandage", Money::from_centavos(15_000), 1, "")
                .unwrap();
            db.sales()
                .record_sale(txn, cart.lines(), cart.total(), PaymentMethod::Cash, "")
                .await
                .unwrap();
        }

        let all = db.sales().report(None, None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].sale_date >= all[1].sale_date);

        let future = Utc::now() + chrono::Duration::days(1);
        assert!(db.sales().report(Some(future), None).await.unwrap().is_empty());

        let past = Utc::now() - chrono::Duration::days(1);
        assert_eq!(db.sales().report(Some(past), Some(future)).await.unwrap().len(), 2);
    }
}
