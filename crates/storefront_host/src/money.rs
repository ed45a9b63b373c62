//! Exact currency amounts.
//!
//! Amounts are held as integer minor units (cents) so running totals never drift. The JSON form
//! is a plain decimal number (`10.99`), which is what the catalog feed and persisted carts carry.

use std::{fmt, iter::Sum};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Largest cent count that survives a round trip through an `f64` JSON number.
const MAX_EXACT_CENTS: u64 = 1 << 53;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Non-negative currency amount in cents.
pub struct Money {
    cents: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Reasons a decimal value cannot be represented as [`Money`].
pub enum MoneyError {
    /// The value was NaN or infinite.
    NotFinite,
    /// The value was below zero.
    Negative(f64),
    /// The value exceeds the exactly representable range.
    OutOfRange(f64),
}

impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFinite => f.write_str("amount is not a finite number"),
            Self::Negative(value) => write!(f, "amount {value} is negative"),
            Self::OutOfRange(value) => write!(f, "amount {value} is out of range"),
        }
    }
}

impl std::error::Error for MoneyError {}

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self { cents: 0 };

    /// Creates an amount from a cent count.
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// Returns the amount in cents.
    pub const fn cents(self) -> u64 {
        self.cents
    }

    /// Returns `true` for a zero amount.
    pub const fn is_zero(self) -> bool {
        self.cents == 0
    }

    /// Converts a decimal currency value, rounding to the nearest cent.
    ///
    /// # Errors
    ///
    /// Returns an error for NaN, infinite, negative, or out-of-range values.
    pub fn from_decimal(value: f64) -> Result<Self, MoneyError> {
        if !value.is_finite() {
            return Err(MoneyError::NotFinite);
        }
        if value < 0.0 {
            return Err(MoneyError::Negative(value));
        }
        let cents = (value * 100.0).round();
        if cents > MAX_EXACT_CENTS as f64 {
            return Err(MoneyError::OutOfRange(value));
        }
        Ok(Self::from_cents(cents as u64))
    }

    /// Returns the amount as a decimal currency value.
    pub fn to_decimal(self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Adds two amounts, saturating at the maximum.
    pub const fn saturating_add(self, other: Self) -> Self {
        Self::from_cents(self.cents.saturating_add(other.cents))
    }

    /// Subtracts `other`, flooring at zero.
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self::from_cents(self.cents.saturating_sub(other.cents))
    }

    /// Multiplies by a unit count, saturating at the maximum.
    pub const fn saturating_mul(self, units: u64) -> Self {
        Self::from_cents(self.cents.saturating_mul(units))
    }

    /// Returns `basis_points / 10_000` of this amount, rounded half-up to the cent.
    pub fn scaled_by_basis_points(self, basis_points: u32) -> Self {
        let scaled = u128::from(self.cents) * u128::from(basis_points);
        let rounded = (scaled + 5_000) / 10_000;
        Self::from_cents(u64::try_from(rounded).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::from_decimal(value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn decimal_values_round_to_nearest_cent() {
        assert_eq!(Money::from_decimal(10.99).expect("price").cents(), 1099);
        assert_eq!(Money::from_decimal(0.1 + 0.2).expect("price").cents(), 30);
        assert_eq!(Money::from_decimal(2.5).expect("price").cents(), 250);
        assert_eq!(Money::from_decimal(0.0).expect("zero"), Money::ZERO);
    }

    #[test]
    fn invalid_decimal_values_are_rejected() {
        assert_eq!(Money::from_decimal(f64::NAN), Err(MoneyError::NotFinite));
        assert_eq!(
            Money::from_decimal(-1.0),
            Err(MoneyError::Negative(-1.0))
        );
        assert!(matches!(
            Money::from_decimal(1e300),
            Err(MoneyError::OutOfRange(_))
        ));
    }

    #[test]
    fn sums_stay_exact_where_floats_drift() {
        let total: Money = std::iter::repeat(Money::from_cents(10))
            .take(10)
            .sum();
        assert_eq!(total, Money::from_cents(100));
        assert_eq!(total.to_string(), "$1.00");
    }

    #[test]
    fn basis_point_scaling_rounds_half_up() {
        // 8% of $12.50 is exactly $1.00; 8% of $0.06 is 0.48 cents.
        assert_eq!(
            Money::from_cents(1250).scaled_by_basis_points(800),
            Money::from_cents(100)
        );
        assert_eq!(
            Money::from_cents(6).scaled_by_basis_points(800),
            Money::ZERO
        );
        assert_eq!(
            Money::from_cents(7).scaled_by_basis_points(800),
            Money::from_cents(1)
        );
    }

    #[test]
    fn json_form_is_a_decimal_number() {
        let price = Money::from_cents(2499);
        assert_eq!(serde_json::to_value(price).expect("serialize"), json!(24.99));
        assert_eq!(
            serde_json::from_value::<Money>(json!(24.99)).expect("decode"),
            price
        );
        assert_eq!(
            serde_json::from_value::<Money>(json!(10)).expect("integer price"),
            Money::from_cents(1000)
        );
        assert!(serde_json::from_value::<Money>(json!(-3.5)).is_err());
        assert!(serde_json::from_value::<Money>(json!("3.50")).is_err());
    }
}
