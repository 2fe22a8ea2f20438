//! Amount parsing with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Ledger amounts and balances are parsed straight into `rust_decimal::Decimal`.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Thousands separator accepted in amount fields (e.g. `1,234.56`).
pub const THOUSANDS_SEPARATOR: char = ',';

/// Error returned when an amount field is not a decimal number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid amount `{input}`: {reason}")]
pub struct AmountParseError {
    /// The raw field text.
    pub input: String,
    /// Why it was rejected.
    pub reason: String,
}

/// Parses a ledger amount such as `-50`, `1000`, or `1,234.56`.
///
/// Surrounding whitespace is ignored and thousands separators are removed
/// before the exact decimal value is parsed.
pub fn parse_amount(input: &str) -> Result<Decimal, AmountParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountParseError {
            input: input.to_string(),
            reason: "empty field".to_string(),
        });
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| *c != THOUSANDS_SEPARATOR)
        .collect();

    Decimal::from_str(&cleaned).map_err(|e| AmountParseError {
        input: input.to_string(),
        reason: e.to_string(),
    })
}
