//! Error types for the currency exchange service.

use crate::domain::{CodePair, CurrencyCode};

/// Validation failures, detected before any store call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Currency code is not present in the request")]
    EmptyCode,

    #[error("Currency code must contain exactly 3 letters as defined in ISO 4217, got: {0}")]
    InvalidLength(String),

    #[error(
        "Currency code must contain exactly 3 uppercase letters as defined in ISO 4217, got: {0}"
    )]
    NotUppercase(String),

    #[error("Code pair must contain exactly 6 letters, got: {0}")]
    InvalidCodePair(String),

    #[error("Field '{0}' is not present in the request")]
    MissingField(&'static str),

    #[error("Rate cannot be negative or zero")]
    NonPositiveRate,

    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Converted amount is out of range for amount {0}")]
    ConvertedAmountOutOfRange(f64),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Couldn't parse {field} from '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Entity not found")]
    NotFound,

    #[error("Entity already exists")]
    AlreadyExists,

    #[error("Database error: {0}")]
    Database(String),
}

/// Application-level errors returned by the services.
///
/// Each variant maps to one response category in the HTTP adapter.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error("Currency not found: {0}")]
    CurrencyNotFound(CurrencyCode),

    #[error("Exchange rate not found: {0}")]
    ExchangeRateNotFound(CodePair),

    #[error("No exchange rate available to convert {} to {}", .0.base, .0.target)]
    RateNotFound(CodePair),

    #[error("Currency already exists: {0}")]
    CurrencyAlreadyExists(CurrencyCode),

    #[error("Exchange rate already exists: {0}")]
    ExchangeRateAlreadyExists(CodePair),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepoError> for AppError {
    /// Fallback mapping for store calls where the caller has no better context.
    ///
    /// Services map `NotFound`/`AlreadyExists` to entity-specific variants
    /// themselves; reaching this impl with those means the store contradicted
    /// an earlier read, which is an internal failure.
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::NotFound => AppError::Internal("Referenced entity is missing".into()),
            RepoError::AlreadyExists => AppError::Internal("Unexpected uniqueness conflict".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_is_transparent() {
        let err = AppError::from(DomainError::NegativeAmount);
        assert_eq!(err.to_string(), "Amount cannot be negative");
    }

    #[test]
    fn test_rate_not_found_message() {
        let err = AppError::RateNotFound(CodePair::parse("RUBEUR").unwrap());
        assert_eq!(
            err.to_string(),
            "No exchange rate available to convert RUB to EUR"
        );
    }

    #[test]
    fn test_database_error_maps_to_internal() {
        let err: AppError = RepoError::Database("disk I/O error".into()).into();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
