//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! All monetary values in the system are integer centavos (`i64`). Floating
//! point never touches money: `0.1 + 0.2` has no exact binary representation,
//! and a clinic ledger that drifts by a centavo per thousand rows is a ledger
//! nobody can reconcile. The database stores centavos, the managers compute
//! in centavos, and only the edges (receipts, CSV) render decimals.
//!
//! ## Usage
//! ```rust
//! use vetclinic_core::money::Money;
//!
//! // Create from centavos (preferred)
//! let price = Money::from_centavos(35_000); // ₱350.00
//!
//! // Arithmetic operations
//! let line_total = price * 3;                       // ₱1050.00
//! let with_fee = price + Money::from_centavos(500); // ₱355.00
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (the smallest peso unit).
///
/// Signed so that corrections and refunds can be represented; every
/// validated input path rejects negative prices before they reach storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use vetclinic_core::money::Money;
    ///
    /// let price = Money::from_centavos(35_000); // ₱350.00
    /// assert_eq!(price.centavos(), 35_000);
    /// ```
    #[inline]
    pub const fn from_centavos(centavos: i64) -> Self {
        Money(centavos)
    }

    /// Creates a Money value from pesos and centavos.
    ///
    /// For negative amounts only the peso part carries the sign:
    /// `from_pesos(-5, 50)` is -₱5.50.
    #[inline]
    pub const fn from_pesos(pesos: i64, centavos: i64) -> Self {
        if pesos < 0 {
            Money(pesos * 100 - centavos)
        } else {
            Money(pesos * 100 + centavos)
        }
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn centavos(&self) -> i64 {
        self.0
    }

    /// Returns the whole-peso portion.
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavo portion (always 0-99).
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a quantity (line subtotals).
    ///
    /// ## Example
    /// ```rust
    /// use vetclinic_core::money::Money;
    ///
    /// let unit_price = Money::from_centavos(15_000); // ₱150.00
    /// assert_eq!(unit_price.multiply_quantity(3).centavos(), 45_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Renders the amount as a plain decimal string without currency symbol,
    /// e.g. `350.00` or `-5.50`. This is the CSV/receipt cell format.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.pesos().abs(), self.centavos_part())
    }

    /// Parses a plain decimal amount (`350`, `350.5`, `350.00`, `-12.25`)
    /// into centavos. Used when re-importing exported CSV data.
    pub fn parse_decimal(input: &str) -> Result<Money, ValidationError> {
        let input = input.trim();
        let invalid = || ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: "expected a decimal number".to_string(),
        };

        if input.is_empty() {
            return Err(invalid());
        }

        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        if whole.is_empty() || whole.chars().any(|c| !c.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 2 || frac.chars().any(|c| !c.is_ascii_digit()) {
            return Err(invalid());
        }

        let pesos: i64 = whole.parse().map_err(|_| invalid())?;
        // "5" -> 50 centavos, "50" -> 50 centavos
        let centavos: i64 = if frac.is_empty() {
            0
        } else {
            let parsed: i64 = frac.parse().map_err(|_| invalid())?;
            if frac.len() == 1 {
                parsed * 10
            } else {
                parsed
            }
        };

        let total = pesos * 100 + centavos;
        Ok(Money(if negative { -total } else { total }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount with the peso sign, for logs and receipts.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₱{}.{:02}", sign, self.pesos().abs(), self.centavos_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_centavos() {
        let money = Money::from_centavos(35_099);
        assert_eq!(money.centavos(), 35_099);
        assert_eq!(money.pesos(), 350);
        assert_eq!(money.centavos_part(), 99);
    }

    #[test]
    fn test_from_pesos() {
        assert_eq!(Money::from_pesos(350, 99).centavos(), 35_099);
        assert_eq!(Money::from_pesos(-5, 50).centavos(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_centavos(35_000)), "₱350.00");
        assert_eq!(format!("{}", Money::from_centavos(1_099)), "₱10.99");
        assert_eq!(format!("{}", Money::from_centavos(-550)), "-₱5.50");
        assert_eq!(format!("{}", Money::zero()), "₱0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_centavos(1_000);
        let b = Money::from_centavos(500);

        assert_eq!((a + b).centavos(), 1_500);
        assert_eq!((a - b).centavos(), 500);
        assert_eq!((a * 3).centavos(), 3_000);

        let mut acc = Money::zero();
        acc += a;
        acc -= b;
        assert_eq!(acc.centavos(), 500);
    }

    #[test]
    fn test_sum_iterator() {
        let total: Money = [100, 250, 50]
            .iter()
            .map(|c| Money::from_centavos(*c))
            .sum();
        assert_eq!(total.centavos(), 400);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_centavos(15_000);
        assert_eq!(unit_price.multiply_quantity(3).centavos(), 45_000);
    }

    #[test]
    fn test_to_decimal_string() {
        assert_eq!(Money::from_centavos(35_000).to_decimal_string(), "350.00");
        assert_eq!(Money::from_centavos(2_505).to_decimal_string(), "25.05");
        assert_eq!(Money::from_centavos(-550).to_decimal_string(), "-5.50");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("350.00").unwrap().centavos(), 35_000);
        assert_eq!(Money::parse_decimal("350").unwrap().centavos(), 35_000);
        assert_eq!(Money::parse_decimal("350.5").unwrap().centavos(), 35_050);
        assert_eq!(Money::parse_decimal("-12.25").unwrap().centavos(), -1_225);
        assert_eq!(Money::parse_decimal(" 25.05 ").unwrap().centavos(), 2_505);

        assert!(Money::parse_decimal("").is_err());
        assert!(Money::parse_decimal("abc").is_err());
        assert!(Money::parse_decimal("1.234").is_err());
        assert!(Money::parse_decimal("1.2.3").is_err());
    }

    #[test]
    fn test_parse_round_trips_render() {
        for centavos in [0, 1, 99, 100, 35_000, 123_456] {
            let money = Money::from_centavos(centavos);
            let parsed = Money::parse_decimal(&money.to_decimal_string()).unwrap();
            assert_eq!(parsed, money);
        }
    }
}
