//! Numeric validation for the collection modes.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ParseError {
    #[error("not a decimal number")]
    NotDecimal,
    #[error("not a whole number")]
    NotInteger,
}

/// Parses a free-form decimal and rounds it to one decimal place.
///
/// Rounding is half-away-from-zero (`f64::round` of the value scaled by
/// ten): `12.25` becomes `12.3`, `-0.05` becomes `-0.1`. Non-finite values
/// are rejected even though they parse as `f64`.
pub(crate) fn decimal_1dp(input: &str) -> Result<f64, ParseError> {
    let value: f64 = input.trim().parse().map_err(|_| ParseError::NotDecimal)?;
    if !value.is_finite() {
        return Err(ParseError::NotDecimal);
    }
    Ok((value * 10.0).round() / 10.0)
}

/// Parses a non-negative integer. Digits only: signs, decimal points and
/// inner whitespace are all rejected.
pub(crate) fn whole_number(input: &str) -> Result<u32, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseError::NotInteger);
    }
    trimmed.parse().map_err(|_| ParseError::NotInteger)
}
