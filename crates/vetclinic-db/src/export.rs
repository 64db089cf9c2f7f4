//! # Export Module
//!
//! File outputs of the clinic core: CSV exports for sales, inventory, and
//! appointments, CSV import for inventory, and receipt-text persistence.
//!
//! Each export writes a fixed header row and one record per data row, in the
//! stored column order minus surrogate ids. Monetary cells are plain
//! decimals (`350.00`); timestamps are `YYYY-MM-DD HH:MM:SS`.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use vetclinic_core::{CoreError, Money, NewInventoryItem, ValidationError};

/// Header row of the sales export.
const SALES_HEADER: &[&str] = &[
    "Transaction ID",
    "Item Name",
    "Quantity",
    "Price",
    "Subtotal",
    "Total Amount",
    "Payment Method",
    "Customer Name",
    "Sale Date",
];

/// Header row of the inventory export.
const INVENTORY_HEADER: &[&str] = &[
    "ID",
    "Name",
    "Price",
    "Stock",
    "Category",
    "Brand",
    "Animal Type",
    "Dosage",
    "Expiration Date",
];

/// Header row of the appointments export.
const APPOINTMENTS_HEADER: &[&str] = &[
    "Appointment ID",
    "Patient Name",
    "Owner Name",
    "Animal Type",
    "Date",
    "Notes",
    "Status",
    "Total Amount",
];

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Exports all sale rows to CSV, newest first. Returns the row count.
pub async fn export_sales_csv(db: &Database, path: &Path) -> DbResult<usize> {
    let records = db.sales().report(None, None).await?;

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(SALES_HEADER)?;

    for record in &records {
        writer.write_record(&[
            record.transaction_id.clone(),
            record.item_name.clone(),
            record.quantity.to_string(),
            record.price().to_decimal_string(),
            record.subtotal().to_decimal_string(),
            record.total().to_decimal_string(),
            record.payment_method.to_string(),
            record.customer_name.clone(),
            format_timestamp(record.sale_date),
        ])?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = records.len(), "Exported sales CSV");
    Ok(records.len())
}

/// Exports the inventory to CSV in listing order. Returns the row count.
pub async fn export_inventory_csv(db: &Database, path: &Path) -> DbResult<usize> {
    let items = db.inventory().list().await?;

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(INVENTORY_HEADER)?;

    for item in &items {
        writer.write_record(&[
            item.id.to_string(),
            item.name.clone(),
            item.price().to_decimal_string(),
            item.stock.to_string(),
            item.category.clone(),
            item.brand.clone(),
            item.animal_type.clone(),
            item.dosage.clone(),
            item.expiration_date.clone(),
        ])?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = items.len(), "Exported inventory CSV");
    Ok(items.len())
}

/// Exports one aggregated row per appointment to CSV, newest first.
/// Returns the row count.
pub async fn export_appointments_csv(db: &Database, path: &Path) -> DbResult<usize> {
    let summaries = db.appointments().list_all().await?;

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(APPOINTMENTS_HEADER)?;

    for summary in &summaries {
        writer.write_record(&[
            summary.appointment_id.clone(),
            summary.patient_name.clone(),
            summary.owner_name.clone(),
            summary.animal_type.clone(),
            format_timestamp(summary.date),
            summary.notes.clone(),
            summary.status.to_string(),
            summary.total().to_decimal_string(),
        ])?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = summaries.len(), "Exported appointments CSV");
    Ok(summaries.len())
}

/// Imports inventory items from a CSV in the export layout. The ID column is
/// ignored; the database assigns fresh surrogate ids. Returns the number of
/// items inserted.
pub async fn import_inventory_csv(db: &Database, path: &Path) -> DbResult<usize> {
    let mut reader = csv::Reader::from_path(path)?;
    let ledger = db.inventory();
    let mut inserted = 0;

    for row in reader.records() {
        let row = row?;

        let field = |idx: usize| row.get(idx).unwrap_or("").to_string();

        let price = Money::parse_decimal(&field(2))
            .map_err(|e| DbError::Domain(CoreError::Validation(e)))?;
        let stock: i64 = field(3).trim().parse().map_err(|_| {
            DbError::Domain(CoreError::Validation(ValidationError::InvalidFormat {
                field: "stock".to_string(),
                reason: format!("'{}' is not an integer", field(3)),
            }))
        })?;

        let item = NewInventoryItem {
            name: field(1),
            price_centavos: price.centavos(),
            stock,
            category: field(4),
            brand: field(5),
            animal_type: field(6),
            dosage: field(7),
            expiration_date: field(8),
        };
        ledger.insert(&item).await?;
        inserted += 1;
    }

    info!(path = %path.display(), inserted, "Imported inventory CSV");
    Ok(inserted)
}

/// Persists rendered receipt text to the given path.
pub fn save_receipt(receipt_text: &str, path: &Path) -> DbResult<()> {
    fs::write(path, receipt_text)?;
    info!(path = %path.display(), bytes = receipt_text.len(), "Saved receipt");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
