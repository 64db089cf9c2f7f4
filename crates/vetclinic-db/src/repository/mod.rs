//! # Repository Module
//!
//! The four managers of the clinic store. Each holds a clone of the shared
//! pool and exposes typed operations; the UI layer never issues raw queries.
//!
//! - [`inventory::InventoryLedger`] - item CRUD, search, stock adjustment
//! - [`appointment::AppointmentBook`] - appointments with billable lines
//! - [`sale::SalesRegister`] - atomic checkout settlement and reports
//! - [`account::AccountDirectory`] - user accounts and authentication

pub mod account;
pub mod appointment;
pub mod inventory;
pub mod sale;
