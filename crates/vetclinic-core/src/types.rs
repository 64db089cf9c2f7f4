//! # Domain Types
//!
//! Core entity models for the clinic: inventory items, appointments with
//! billable service lines, sale rows, and user accounts.
//!
//! ## Identity
//! - Inventory items and accounts use surrogate AUTOINCREMENT ids owned by
//!   the database.
//! - Appointments and sales use generated human-readable ids (`APT…`/`TXN…`,
//!   see [`crate::ids`]) shared by every line row of the same record.
//!
//! ## Money
//! Monetary fields are stored as `*_centavos: i64` with [`Money`] accessor
//! methods; no floating point is involved anywhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Account & Role
// =============================================================================

/// Account role. Admin unlocks user management; everything else is staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
}

impl Default for Role {
    fn default() -> Self {
        Role::Staff
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Staff => write!(f, "staff"),
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            other => Err(ValidationError::InvalidFormat {
                field: "role".to_string(),
                reason: format!("unknown role '{other}'"),
            }),
        }
    }
}

/// A system user account.
///
/// The password is opaque text, stored exactly as provided.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl Account {
    /// Checks credentials against this account.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }

    /// Whether this account may manage other accounts.
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// An item in the clinic inventory: medicine, supply, or pet food.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryItem {
    /// Surrogate id (AUTOINCREMENT).
    pub id: i64,

    /// Display name shown in listings and on receipts.
    pub name: String,

    /// Unit price in centavos.
    pub price_centavos: i64,

    /// Units on hand. Every mutation path keeps this non-negative.
    pub stock: i64,

    /// Category tag ("Dog Medicines", "Pet Food", ...).
    pub category: String,

    /// Brand label.
    pub brand: String,

    /// Target animal ("Dog", "Cat", "All").
    pub animal_type: String,

    /// Dosage/unit descriptor ("1ml", "1 tablet", "N/A").
    pub dosage: String,

    /// Expiration descriptor, free text ("2 years").
    pub expiration_date: String,
}

impl InventoryItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_centavos(self.price_centavos)
    }

    /// Whether `quantity` units can currently be taken from stock.
    pub fn can_supply(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

/// Insert shape for a new inventory item (the database assigns the id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub name: String,
    pub price_centavos: i64,
    pub stock: i64,
    pub category: String,
    pub brand: String,
    pub animal_type: String,
    pub dosage: String,
    pub expiration_date: String,
}

impl NewInventoryItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_centavos(self.price_centavos)
    }
}

// =============================================================================
// Appointment Status
// =============================================================================

/// Appointment lifecycle status.
///
/// Allowed transitions:
/// ```text
/// SCHEDULED ──► IN_PROGRESS ──► COMPLETED
///     │              │
///     └──────────────┴────────► CANCELLED
/// ```
/// COMPLETED and CANCELLED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum AppointmentStatus {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "SCHEDULED"))]
    #[serde(rename = "SCHEDULED")]
    Scheduled,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "IN_PROGRESS"))]
    #[serde(rename = "IN_PROGRESS")]
    InProgress,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "COMPLETED"))]
    #[serde(rename = "COMPLETED")]
    Completed,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "CANCELLED"))]
    #[serde(rename = "CANCELLED")]
    Cancelled,
}

impl AppointmentStatus {
    /// Whether a transition from `self` to `to` is allowed.
    pub fn can_transition_to(&self, to: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, to),
            (Scheduled, InProgress)
                | (Scheduled, Cancelled)
                | (InProgress, Completed)
                | (InProgress, Cancelled)
        )
    }

    /// Terminal statuses accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }

    /// The stored text form (`SCHEDULED`, `IN_PROGRESS`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "SCHEDULED",
            AppointmentStatus::InProgress => "IN_PROGRESS",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
        }
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Scheduled
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCHEDULED" => Ok(AppointmentStatus::Scheduled),
            "IN_PROGRESS" => Ok(AppointmentStatus::InProgress),
            "COMPLETED" => Ok(AppointmentStatus::Completed),
            "CANCELLED" => Ok(AppointmentStatus::Cancelled),
            other => Err(ValidationError::InvalidFormat {
                field: "status".to_string(),
                reason: format!("unknown status '{other}'"),
            }),
        }
    }
}

// =============================================================================
// Appointment
// =============================================================================

/// One billable service line of an appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceLine {
    /// Service name ("Consultation", "Vaccination", ...).
    pub service: String,
    /// Units performed.
    pub quantity: i64,
    /// Unit price in centavos.
    pub price_centavos: i64,
    /// Line subtotal in centavos (price × quantity).
    pub subtotal_centavos: i64,
}

impl ServiceLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_centavos(self.price_centavos)
    }

    /// Returns the line subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_centavos(self.subtotal_centavos)
    }
}

/// A veterinary appointment with one or more billable service lines.
///
/// Invariant: `total_centavos == Σ services[i].subtotal_centavos`, maintained
/// by [`Appointment::add_service`] and re-checked at persist time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    /// Generated id (`APT…`) shared by all line rows of this appointment.
    pub appointment_id: String,
    pub patient_name: String,
    pub owner_name: String,
    pub animal_type: String,
    pub notes: String,
    pub status: AppointmentStatus,
    pub date: DateTime<Utc>,
    pub services: Vec<ServiceLine>,
    pub total_centavos: i64,
}

impl Appointment {
    /// Creates an appointment shell with no services yet.
    pub fn new(
        appointment_id: impl Into<String>,
        patient_name: impl Into<String>,
        owner_name: impl Into<String>,
        animal_type: impl Into<String>,
        notes: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Appointment {
            appointment_id: appointment_id.into(),
            patient_name: patient_name.into(),
            owner_name: owner_name.into(),
            animal_type: animal_type.into(),
            notes: notes.into(),
            status: AppointmentStatus::Scheduled,
            date,
            services: Vec::new(),
            total_centavos: 0,
        }
    }

    /// Appends a billable service line and updates the running total.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::Utc;
    /// use vetclinic_core::money::Money;
    /// use vetclinic_core::types::Appointment;
    ///
    /// let mut apt = Appointment::new("APT1", "Rex", "Ana", "Dog", "", Utc::now());
    /// apt.add_service("Consultation", 1, Money::from_centavos(50_000));
    /// apt.add_service("Vaccination", 1, Money::from_centavos(80_000));
    /// assert_eq!(apt.total().centavos(), 130_000);
    /// ```
    pub fn add_service(&mut self, service: impl Into<String>, quantity: i64, price: Money) {
        let subtotal = price.multiply_quantity(quantity);
        self.services.push(ServiceLine {
            service: service.into(),
            quantity,
            price_centavos: price.centavos(),
            subtotal_centavos: subtotal.centavos(),
        });
        self.total_centavos += subtotal.centavos();
    }

    /// Returns the appointment total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_centavos(self.total_centavos)
    }

    /// Sum of the service line subtotals (for invariant checks).
    pub fn computed_total_centavos(&self) -> i64 {
        self.services.iter().map(|s| s.subtotal_centavos).sum()
    }
}

/// One aggregated listing row per distinct appointment id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AppointmentSummary {
    pub appointment_id: String,
    pub patient_name: String,
    pub owner_name: String,
    pub animal_type: String,
    pub date: DateTime<Utc>,
    pub notes: String,
    pub status: AppointmentStatus,
    pub total_centavos: i64,
}

impl AppointmentSummary {
    /// Returns the appointment total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_centavos(self.total_centavos)
    }
}

/// One stored line row of an appointment, as returned by history queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AppointmentLine {
    pub appointment_id: String,
    pub patient_name: String,
    pub owner_name: String,
    pub animal_type: String,
    pub service: String,
    pub qty: i64,
    pub price_centavos: i64,
    pub subtotal_centavos: i64,
    pub date: DateTime<Utc>,
    pub notes: String,
    pub status: AppointmentStatus,
    pub total_centavos: i64,
}

// =============================================================================
// Payment Method
// =============================================================================

/// Accepted payment methods at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum PaymentMethod {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Cash"))]
    #[serde(rename = "Cash")]
    Cash,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Credit Card"))]
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "GCash"))]
    #[serde(rename = "GCash")]
    GCash,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Bank Transfer"))]
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
}

impl PaymentMethod {
    /// The stored/displayed text form.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::GCash => "GCash",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cash" => Ok(PaymentMethod::Cash),
            "Credit Card" => Ok(PaymentMethod::CreditCard),
            "GCash" => Ok(PaymentMethod::GCash),
            "Bank Transfer" => Ok(PaymentMethod::BankTransfer),
            other => Err(ValidationError::InvalidFormat {
                field: "payment_method".to_string(),
                reason: format!("unknown payment method '{other}'"),
            }),
        }
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// One persisted sale row: a single sold line of a checkout transaction.
///
/// Uses the snapshot pattern: the item name and price are frozen at sale
/// time, so later catalog edits never rewrite history. All rows sharing a
/// `transaction_id` carry the identical `total_centavos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleRecord {
    /// Surrogate row id.
    pub id: i64,
    /// Generated transaction id (`TXN…`) shared by all rows of one checkout.
    pub transaction_id: String,
    /// Inventory item reference.
    pub item_id: i64,
    /// Item name at time of sale (frozen).
    pub item_name: String,
    /// Units sold.
    pub quantity: i64,
    /// Unit price in centavos at time of sale (frozen).
    pub price_centavos: i64,
    /// Line subtotal in centavos.
    pub subtotal_centavos: i64,
    /// Transaction total in centavos, identical across the transaction.
    pub total_centavos: i64,
    pub payment_method: PaymentMethod,
    pub customer_name: String,
    pub sale_date: DateTime<Utc>,
}

impl SaleRecord {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_centavos(self.price_centavos)
    }

    /// Returns the line subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_centavos(self.subtotal_centavos)
    }

    /// Returns the transaction total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_centavos(self.total_centavos)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use AppointmentStatus::*;

        assert!(Scheduled.can_transition_to(InProgress));
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(InProgress.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Cancelled));

        assert!(!Scheduled.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Completed));
        assert!(!Scheduled.can_transition_to(Scheduled));

        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!Scheduled.is_terminal());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            AppointmentStatus::Scheduled,
            AppointmentStatus::InProgress,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
        ] {
            let parsed: AppointmentStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("DONE".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn test_payment_method_round_trip() {
        for method in [
            PaymentMethod::Cash,
            PaymentMethod::CreditCard,
            PaymentMethod::GCash,
            PaymentMethod::BankTransfer,
        ] {
            let parsed: PaymentMethod = method.as_str().parse().unwrap();
            assert_eq!(parsed, method);
        }
        assert!("Barter".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_appointment_total_tracks_services() {
        let mut apt = Appointment::new("APT1", "Rex", "Ana", "Dog", "", Utc::now());
        apt.add_service("Consultation", 1, Money::from_centavos(50_000));
        apt.add_service("Vaccination", 1, Money::from_centavos(80_000));

        assert_eq!(apt.services.len(), 2);
        assert_eq!(apt.total_centavos, 130_000);
        assert_eq!(apt.computed_total_centavos(), apt.total_centavos);
        assert_eq!(apt.services[1].subtotal_centavos, 80_000);
    }

    #[test]
    fn test_account_authenticate() {
        let account = Account {
            id: 1,
            username: "admin".to_string(),
            password: "admin123".to_string(),
            role: Role::Admin,
        };
        assert!(account.authenticate("admin", "admin123"));
        assert!(!account.authenticate("admin", "wrong"));
        assert!(account.is_admin());
    }

    #[test]
    fn test_item_can_supply() {
        let item = InventoryItem {
            id: 1,
            name: "Sterile Bandage 5cm x 5m".to_string(),
            price_centavos: 15_000,
            stock: 3,
            category: "Dog Medicines".to_string(),
            brand: "Generic".to_string(),
            animal_type: "All".to_string(),
            dosage: "N/A".to_string(),
            expiration_date: "5 years".to_string(),
        };
        assert!(item.can_supply(3));
        assert!(!item.can_supply(4));
        assert_eq!(item.price().centavos(), 15_000);
    }
}
