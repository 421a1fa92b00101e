//! Money helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` end to end; only the wire encoding
//! turns them into JSON numbers.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use thiserror::Error;

/// Number of decimal places amounts are displayed and stored with.
pub const MONEY_SCALE: u32 = 2;

/// Largest amount a single line can carry: 999,999,999,999.99.
///
/// Bounded so every amount has at most 14 significant digits and survives
/// the JSON number encoding unchanged.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, MONEY_SCALE);

/// Errors raised while reading a user-entered amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The text is not a decimal number.
    #[error("Invalid amount: {0}")]
    Invalid(String),

    /// The amount is zero or negative.
    #[error("Amount must be positive: {0}")]
    NotPositive(Decimal),

    /// The amount has more than two decimal places.
    #[error("Amount has more than 2 decimal places: {0}")]
    TooPrecise(Decimal),

    /// The amount exceeds `MAX_AMOUNT`.
    #[error("Amount exceeds the maximum of 999,999,999,999.99: {0}")]
    TooLarge(Decimal),
}

/// Parses a user-entered amount such as `"45.50"` or `"1,200.00"`.
///
/// Thousands separators are accepted; the result must pass `check_amount`.
///
/// # Errors
///
/// Returns `MoneyError::Invalid` for unparseable text, otherwise whatever
/// `check_amount` reports.
pub fn parse_amount(input: &str) -> Result<Decimal, MoneyError> {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    let amount =
        Decimal::from_str(&cleaned).map_err(|_| MoneyError::Invalid(input.trim().to_string()))?;
    check_amount(amount)
}

/// Checks that an amount is positive, has at most `MONEY_SCALE` decimal
/// places and does not exceed `MAX_AMOUNT`.
///
/// Trailing zeros do not count as decimal places (`1.500` is accepted).
///
/// # Errors
///
/// Returns the first bound the amount breaks.
pub fn check_amount(amount: Decimal) -> Result<Decimal, MoneyError> {
    if amount <= Decimal::ZERO {
        return Err(MoneyError::NotPositive(amount));
    }
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(MoneyError::TooPrecise(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(MoneyError::TooLarge(amount));
    }
    Ok(amount)
}

/// Serde helpers for optional amounts sent as JSON numbers.
///
/// The decimal text is parsed into the nearest `f64`, so any amount within
/// the money bounds is written with its exact decimal digits and reads
/// back to the same `Decimal`.
pub mod wire_option {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde::{Deserializer, Serializer, ser::Error as _};

    /// Serializes `Some(amount)` as a JSON number and `None` as `null`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(amount) => {
                let number = f64::from_str(&amount.normalize().to_string()).map_err(S::Error::custom)?;
                serializer.serialize_some(&number)
            }
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes a JSON number or `null`.
    ///
    /// # Errors
    ///
    /// Fails when the value is neither a number nor `null`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Decimal>, D::Error> {
        rust_decimal::serde::float_option::deserialize(deserializer)
    }
}

/// Rounds an amount to two decimal places using Banker's Rounding.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}
