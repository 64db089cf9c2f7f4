//! # Generated Identifiers
//!
//! Human-readable ids for appointments (`APT…`) and sale transactions
//! (`TXN…`): a fixed prefix, a `YYYYMMDDHHMMSS` timestamp, and a random
//! 4-hex-digit suffix. The suffix keeps ids unique even when several are
//! generated within the same second.

use chrono::Utc;
use uuid::Uuid;

/// Timestamp layout shared by all generated ids.
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Generates a new appointment id, e.g. `APT20260806103000-3fa9`.
pub fn generate_appointment_id() -> String {
    generate_id("APT")
}

/// Generates a new sale transaction id, e.g. `TXN20260806114500-9f1c`.
pub fn generate_transaction_id() -> String {
    generate_id("TXN")
}

fn generate_id(prefix: &str) -> String {
    let timestamp = Utc::now().format(TIMESTAMP_FORMAT);
    let random = Uuid::new_v4().simple().to_string();
    format!("{prefix}{timestamp}-{}", &random[..4])
}

// =============================================================================
// Unit Tests
// =============================================================================
