//! # vetclinic-db: Database Layer for the Clinic
//!
//! Persistence for the clinic core, using SQLite with sqlx.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     vetclinic-db (THIS CRATE)                   │
//! │                                                                 │
//! │   ┌──────────────┐   ┌─────────────────────┐   ┌────────────┐   │
//! │   │   Database   │   │      Managers       │   │ Migrations │   │
//! │   │  (pool.rs)   │◄──│ InventoryLedger     │   │ (embedded) │   │
//! │   │              │   │ AppointmentBook     │   │ 0001_…     │   │
//! │   │  SqlitePool  │   │ SalesRegister       │   │ 0002_…     │   │
//! │   │  WAL mode    │   │ AccountDirectory    │   │ 0003_…     │   │
//! │   └──────┬───────┘   └─────────────────────┘   └────────────┘   │
//! │          │                                                      │
//! │          ▼                                                      │
//! │   SQLite database file (vetclinic.db)                           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`seed`] - Default accounts and catalog seeding
//! - [`catalog`] - Static catalog and service price definitions
//! - [`repository`] - The four managers
//! - [`export`] - CSV export/import and receipt persistence
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vetclinic_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("vetclinic.db")).await?;
//! vetclinic_db::seed::seed_default_accounts(db.pool()).await?;
//! vetclinic_db::seed::seed_catalog(db.pool()).await?;
//!
//! let items = db.inventory().search("vaccine").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod export;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Manager re-exports for convenience
pub use repository::account::AccountDirectory;
pub use repository::appointment::AppointmentBook;
pub use repository::inventory::InventoryLedger;
pub use repository::sale::SalesRegister;
