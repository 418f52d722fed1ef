//! Exact amount handling: parsing caller input into a bounded, non-negative
//! [`Decimal`].

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::errors::LedgerError;

/// Amount as handed over by a presentation layer: raw text from an entry
/// field, a float from a numeric widget, or an already exact decimal.
#[derive(Debug, Clone, PartialEq)]
pub enum AmountInput {
    Text(String),
    Float(f64),
    Exact(Decimal),
}

impl AmountInput {
    /// Converts the input into a validated, non-negative decimal.
    pub fn resolve(self) -> Result<Decimal, LedgerError> {
        let value = match self {
            AmountInput::Text(text) => parse_amount(&text)?,
            AmountInput::Float(value) => from_float(value)?,
            AmountInput::Exact(value) => value,
        };
        ensure_in_range(value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        AmountInput::Text(value)
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Float(value)
    }
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        AmountInput::Exact(value)
    }
}

impl From<i32> for AmountInput {
    fn from(value: i32) -> Self {
        AmountInput::Exact(Decimal::from(value))
    }
}

impl From<i64> for AmountInput {
    fn from(value: i64) -> Self {
        AmountInput::Exact(Decimal::from(value))
    }
}

impl From<u64> for AmountInput {
    fn from(value: u64) -> Self {
        AmountInput::Exact(Decimal::from(value))
    }
}

/// Parses user-typed text. Accepts plain decimals (`1200`, `0.10`, `.5`,
/// `+3`) and scientific notation (`1e3`); rejects everything else,
/// including `nan` and `inf`.
pub fn parse_amount(input: &str) -> Result<Decimal, LedgerError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::validation("amount is required"));
    }
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let normalized = if let Some(rest) = unsigned.strip_prefix("-.") {
        format!("-0.{rest}")
    } else if let Some(rest) = unsigned.strip_prefix('.') {
        format!("0.{rest}")
    } else {
        unsigned.to_string()
    };
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|_| LedgerError::validation(format!("amount `{trimmed}` is not a number")))
}

/// Converts a float through its shortest decimal text, so `0.1` becomes
/// exactly `0.1` rather than the nearest binary fraction.
pub fn from_float(value: f64) -> Result<Decimal, LedgerError> {
    if !value.is_finite() {
        return Err(LedgerError::validation(format!(
            "amount `{value}` is not a finite number"
        )));
    }
    Decimal::from_str(&value.to_string())
        .map_err(|_| LedgerError::validation(format!("amount `{value}` is out of range")))
}

/// Largest amount a single record may carry. Sums of any realistic number
/// of records stay far inside the `Decimal` range, and every accepted value
/// is written to disk and read back unchanged.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Rejects negative amounts and amounts above [`MAX_AMOUNT`].
pub fn ensure_in_range(value: Decimal) -> Result<Decimal, LedgerError> {
    if value < Decimal::ZERO {
        return Err(LedgerError::validation(format!(
            "amount must not be negative (got {value})"
        )));
    }
    if value > MAX_AMOUNT {
        return Err(LedgerError::validation(format!(
            "amount {value} exceeds the maximum of {MAX_AMOUNT}"
        )));
    }
    if value.is_zero() {
        // Drop a negative-zero sign.
        return Ok(value.abs());
    }
    Ok(value)
}
