//! # vetclinic-core: Pure Business Logic for the Clinic
//!
//! This crate is the heart of the clinic system. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Clinic Architecture                         │
//! │                                                                 │
//! │  UI layer (out of scope: windows, forms, navigation)            │
//! │       │                                                         │
//! │  ┌────▼────────────────────────────────────────────────────┐    │
//! │  │           ★ vetclinic-core (THIS CRATE) ★               │    │
//! │  │                                                         │    │
//! │  │  ┌───────┐ ┌───────┐ ┌──────┐ ┌─────────┐ ┌──────────┐ │    │
//! │  │  │ types │ │ money │ │ cart │ │ receipt │ │validation│ │    │
//! │  │  └───────┘ └───────┘ └──────┘ └─────────┘ └──────────┘ │    │
//! │  │                                                         │    │
//! │  │  NO I/O • NO DATABASE • NO FILES • PURE FUNCTIONS       │    │
//! │  └────┬────────────────────────────────────────────────────┘    │
//! │       │                                                         │
//! │  ┌────▼────────────────────────────────────────────────────┐    │
//! │  │              vetclinic-db (Database Layer)              │    │
//! │  │     SQLite queries, migrations, managers, export        │    │
//! │  └─────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entity models (InventoryItem, Appointment, SaleRecord, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - In-memory cart aggregation before checkout
//! - [`receipt`] - Deterministic fixed-width receipt rendering
//! - [`ids`] - Generated appointment/transaction identifiers
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic where its inputs are
//! 2. **No I/O**: database, network, and file access are forbidden here
//! 3. **Integer Money**: all monetary values are centavos (i64)
//! 4. **Explicit Errors**: errors are typed enums, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod ids;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ids::{generate_appointment_id, generate_transaction_id};
pub use money::Money;
pub use receipt::{Receipt, ReceiptLine};
pub use types::*;
