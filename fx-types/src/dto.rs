//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Request bodies are form-encoded and keep every field as a string, so that
//! a missing or malformed field surfaces as a [`DomainError`] with a readable
//! message instead of a generic extractor rejection.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Currency;
use crate::domain::validation::parse_number;
use crate::error::DomainError;
use exchange_rates::Strategy;

// ─────────────────────────────────────────────────────────────────────────────
// Currency DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to add a new currency.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AddCurrencyRequest {
    /// Display name of the currency
    #[schema(example = "Euro")]
    pub name: String,
    /// Three uppercase letters, unique
    #[schema(example = "EUR")]
    pub code: String,
    /// Display symbol
    #[schema(example = "€")]
    pub sign: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Exchange rate DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to add a new exchange rate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AddExchangeRateRequest {
    #[schema(example = "USD")]
    pub base_currency_code: String,
    #[schema(example = "EUR")]
    pub target_currency_code: String,
    /// Units of target per 1 unit of base
    #[schema(example = "0.93")]
    pub rate: String,
}

impl AddExchangeRateRequest {
    pub fn parsed_rate(&self) -> Result<f64, DomainError> {
        parse_number("rate", &self.rate)
    }
}

/// Request to replace the rate of an existing exchange rate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateExchangeRateRequest {
    #[schema(example = "0.95")]
    pub rate: String,
}

impl UpdateExchangeRateRequest {
    pub fn parsed_rate(&self) -> Result<f64, DomainError> {
        parse_number("rate", &self.rate)
    }
}

/// An exchange rate with both currencies resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateResponse {
    pub id: crate::ExchangeRateId,
    pub base_currency: Currency,
    pub target_currency: Currency,
    /// Units of target per 1 unit of base
    #[schema(example = 0.93)]
    pub rate: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query parameters of a conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct ExchangeQuery {
    /// Base currency code
    #[param(example = "USD")]
    pub from: String,
    /// Target currency code
    #[param(example = "EUR")]
    pub to: String,
    /// Amount of base currency, zero or greater
    #[param(example = "100")]
    pub amount: String,
}

impl ExchangeQuery {
    pub fn parsed_amount(&self) -> Result<f64, DomainError> {
        parse_number("amount", &self.amount)
    }
}

/// Result of converting an amount between two currencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeResponse {
    pub base_currency: Currency,
    pub target_currency: Currency,
    /// Rate applied, at full precision
    #[schema(example = 0.93)]
    pub rate: f64,
    #[schema(example = 100.0)]
    pub amount: f64,
    /// `amount * rate`, rounded half away from zero to 2 places
    #[schema(example = 93.0)]
    pub converted_amount: f64,
    /// Which rule of the fallback chain produced the rate
    pub strategy: Strategy,
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Currency not found: XYZ")]
    pub error: String,
    #[schema(example = 404)]
    pub code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_exchange_rate_request_uses_camel_case() {
        let req: AddExchangeRateRequest = serde_json::from_value(serde_json::json!({
            "baseCurrencyCode": "USD",
            "targetCurrencyCode": "EUR",
            "rate": "0.93"
        }))
        .unwrap();

        assert_eq!(req.base_currency_code, "USD");
        assert_eq!(req.target_currency_code, "EUR");
        assert_eq!(req.parsed_rate(), Ok(0.93));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let req: AddCurrencyRequest = serde_json::from_str("{}").unwrap();
        assert!(req.name.is_empty());
        assert!(req.code.is_empty());
    }

    #[test]
    fn test_unparsable_rate() {
        let req = UpdateExchangeRateRequest {
            rate: "abc".to_string(),
        };
        assert_eq!(
            req.parsed_rate().unwrap_err().to_string(),
            "Couldn't parse rate from 'abc'"
        );
    }

    #[test]
    fn test_missing_amount() {
        let query = ExchangeQuery {
            from: "USD".into(),
            to: "EUR".into(),
            amount: String::new(),
        };
        assert_eq!(
            query.parsed_amount(),
            Err(DomainError::MissingField("amount"))
        );
    }
}
