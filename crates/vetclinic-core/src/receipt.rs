//! # Receipt Rendering
//!
//! Fixed-layout text receipts for finalized appointments and sales.
//!
//! Rendering is a pure function of the receipt data: identical inputs yield
//! byte-identical output, so receipts can be snapshot-tested. Persisting the
//! rendered text to disk is a vetclinic-db concern (`export::save_receipt`).

use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::money::Money;
use crate::types::{Appointment, ServiceLine};

/// Banner width of the receipt, in characters.
const WIDTH: usize = 50;

/// Item names longer than this are truncated with an ellipsis.
const NAME_WIDTH: usize = 30;

/// One printable line item (service or sold item).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: i64,
    pub price: Money,
    pub subtotal: Money,
}

impl From<&ServiceLine> for ReceiptLine {
    fn from(line: &ServiceLine) -> Self {
        ReceiptLine {
            name: line.service.clone(),
            quantity: line.quantity,
            price: line.price(),
            subtotal: line.subtotal(),
        }
    }
}

impl From<&CartLine> for ReceiptLine {
    fn from(line: &CartLine) -> Self {
        ReceiptLine {
            name: line.name.clone(),
            quantity: line.quantity,
            price: line.price(),
            subtotal: line.subtotal(),
        }
    }
}

/// A finalized transaction ready for printing.
///
/// The same layout serves both entry points: appointments print their
/// service lines; point-of-sale checkouts print their cart lines with the
/// customer name in both the patient and owner slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// Appointment or transaction id (`APT…`/`TXN…`).
    pub reference: String,
    /// Preformatted date text (`YYYY-MM-DD HH:MM:SS`).
    pub date: String,
    pub patient: String,
    pub owner: String,
    pub animal_type: String,
    /// Free-text notes; the notes line is omitted when empty.
    pub notes: String,
    pub total: Money,
    pub lines: Vec<ReceiptLine>,
}

impl Receipt {
    /// Builds a receipt from a recorded appointment.
    pub fn for_appointment(appointment: &Appointment) -> Self {
        Receipt {
            reference: appointment.appointment_id.clone(),
            date: appointment.date.format("%Y-%m-%d %H:%M:%S").to_string(),
            patient: appointment.patient_name.clone(),
            owner: appointment.owner_name.clone(),
            animal_type: appointment.animal_type.clone(),
            notes: appointment.notes.clone(),
            total: appointment.total(),
            lines: appointment.services.iter().map(ReceiptLine::from).collect(),
        }
    }

    /// Builds a receipt for a point-of-sale checkout.
    pub fn for_sale(
        transaction_id: impl Into<String>,
        customer_name: impl Into<String>,
        date: impl Into<String>,
        cart_lines: &[CartLine],
        total: Money,
    ) -> Self {
        let customer = customer_name.into();
        Receipt {
            reference: transaction_id.into(),
            date: date.into(),
            patient: customer.clone(),
            owner: customer,
            animal_type: "Various".to_string(),
            notes: "POS Sale".to_string(),
            total,
            lines: cart_lines.iter().map(ReceiptLine::from).collect(),
        }
    }

    /// Renders the receipt as a fixed-width text block.
    ///
    /// Deterministic: byte-identical output for identical inputs.
    pub fn render(&self) -> String {
        let bar = "=".repeat(WIDTH);
        let rule = "-".repeat(WIDTH);
        let mut out = String::new();

        out.push_str(&bar);
        out.push('\n');
        out.push_str("         VETERINARY CLINIC\n");
        out.push_str("       Official Service Receipt\n");
        out.push_str("   123 Main Street, City, Philippines\n");
        out.push_str("          Tel: (02) 1234-5678\n");
        out.push_str(&bar);
        out.push_str("\n\n");

        out.push_str(&format!("Appointment: {}\n", self.reference));
        out.push_str(&format!("Date: {}\n", self.date));
        out.push_str(&format!("Patient: {}\n", self.patient));
        out.push_str(&format!("Owner: {}\n", self.owner));
        out.push_str(&format!("Animal Type: {}\n", self.animal_type));
        if !self.notes.is_empty() {
            out.push_str(&format!("Notes: {}\n", self.notes));
        }

        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
        out.push_str("SERVICE/ITEM                       QTY   PRICE   SUBTOTAL\n");
        out.push_str(&rule);
        out.push('\n');

        for line in &self.lines {
            out.push_str(&format!(
                "{:<30} {:>3}  ₱{:>6}  ₱{:>7}\n",
                truncate_name(&line.name),
                line.quantity,
                line.price.to_decimal_string(),
                line.subtotal.to_decimal_string(),
            ));
        }

        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("TOTAL: ₱{:>38}\n", self.total.to_decimal_string()));
        out.push_str(&bar);
        out.push_str("\n\n");

        out.push_str("POLICY:\n");
        out.push_str("• Follow-up appointments as advised\n");
        out.push_str("• Keep this receipt for records\n");
        out.push_str("• Contact us for any concerns\n\n");

        out.push_str("Thank you for choosing our clinic!\n");
        out.push_str("We care for your pets\n");
        out.push_str(&bar);
        out.push('\n');

        out
    }
}

/// Truncates an item name to the column width, ellipsizing long names.
fn truncate_name(name: &str) -> String {
    if name.chars().count() > NAME_WIDTH {
        let head: String = name.chars().take(NAME_WIDTH - 3).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
