//! Stateless input checks.
//!
//! Everything here is pure and runs before any store call.

use crate::error::DomainError;

/// Checks that `code` looks like an ISO 4217 code: three uppercase ASCII letters.
pub fn validate_currency_code(code: &str) -> Result<(), DomainError> {
    if code.is_empty() {
        return Err(DomainError::EmptyCode);
    }
    if code.chars().count() != 3 {
        return Err(DomainError::InvalidLength(code.to_string()));
    }
    // Digits and symbols are unchanged by uppercasing, so they are rejected explicitly.
    if code != code.to_uppercase() || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(DomainError::NotUppercase(code.to_string()));
    }
    Ok(())
}

/// A rate must be a finite number strictly greater than zero.
pub fn validate_rate(rate: f64) -> Result<f64, DomainError> {
    if !rate.is_finite() {
        return Err(DomainError::InvalidNumber {
            field: "rate",
            value: rate.to_string(),
        });
    }
    if rate <= 0.0 {
        return Err(DomainError::NonPositiveRate);
    }
    Ok(rate)
}

/// An amount must be a finite number, zero or greater.
pub fn validate_amount(amount: f64) -> Result<f64, DomainError> {
    if !amount.is_finite() {
        return Err(DomainError::InvalidNumber {
            field: "amount",
            value: amount.to_string(),
        });
    }
    if amount < 0.0 {
        return Err(DomainError::NegativeAmount);
    }
    Ok(amount)
}

/// A converted amount must still be a finite number.
pub fn validate_converted_amount(amount: f64, converted: f64) -> Result<f64, DomainError> {
    if converted.is_finite() {
        Ok(converted)
    } else {
        Err(DomainError::ConvertedAmountOutOfRange(amount))
    }
}

/// Rejects blank required text fields.
pub fn require_non_empty<'a>(field: &'static str, value: &'a str) -> Result<&'a str, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::MissingField(field));
    }
    Ok(trimmed)
}

/// Parses a numeric request field.
pub fn parse_number(field: &'static str, raw: &str) -> Result<f64, DomainError> {
    let raw = require_non_empty(field, raw)?;
    raw.parse::<f64>().map_err(|_| DomainError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}
