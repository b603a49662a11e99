//! Currency codes and directional code pairs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::validate_currency_code;
use crate::error::DomainError;

/// A validated three-letter currency code, e.g. `USD`.
///
/// The only way to build one is through [`CurrencyCode::parse`], so holding a
/// `CurrencyCode` means the code is well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "USD")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        validate_currency_code(code)?;
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_currency_code(&value)?;
        Ok(Self(value))
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Directional pair of codes, written on the wire as six characters: `USDEUR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodePair {
    pub base: CurrencyCode,
    pub target: CurrencyCode,
}

impl CodePair {
    pub fn new(base: CurrencyCode, target: CurrencyCode) -> Self {
        Self { base, target }
    }

    /// Splits a six-character pair into base (first 3) and target (last 3).
    pub fn parse(pair: &str) -> Result<Self, DomainError> {
        if pair.len() != 6 || !pair.is_ascii() {
            return Err(DomainError::InvalidCodePair(pair.to_string()));
        }
        let (base, target) = pair.split_at(3);
        Ok(Self {
            base: CurrencyCode::parse(base)?,
            target: CurrencyCode::parse(target)?,
        })
    }
}

impl fmt::Display for CodePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.target)
    }
}

impl FromStr for CodePair {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code() {
        let code = CurrencyCode::parse("EUR").unwrap();
        assert_eq!(code.as_str(), "EUR");
        assert_eq!(code.to_string(), "EUR");
    }

    #[test]
    fn test_parse_code_rejects_lowercase() {
        assert!(matches!(
            "eur".parse::<CurrencyCode>(),
            Err(DomainError::NotUppercase(_))
        ));
    }

    #[test]
    fn test_code_deserialize_validates() {
        let ok: CurrencyCode = serde_json::from_str(r#""GBP""#).unwrap();
        assert_eq!(ok.as_str(), "GBP");

        let bad = serde_json::from_str::<CurrencyCode>(r#""GBPX""#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_parse_pair() {
        let pair = CodePair::parse("USDEUR").unwrap();
        assert_eq!(pair.base.as_str(), "USD");
        assert_eq!(pair.target.as_str(), "EUR");
        assert_eq!(pair.to_string(), "USDEUR");
    }

    #[test]
    fn test_parse_pair_wrong_length() {
        assert!(matches!(
            CodePair::parse("USDEU"),
            Err(DomainError::InvalidCodePair(_))
        ));
        assert!(matches!(
            CodePair::parse("USDEURO"),
            Err(DomainError::InvalidCodePair(_))
        ));
        assert!(matches!(
            CodePair::parse(""),
            Err(DomainError::InvalidCodePair(_))
        ));
    }

    #[test]
    fn test_parse_pair_validates_each_half() {
        assert!(matches!(
            CodePair::parse("usdEUR"),
            Err(DomainError::NotUppercase(_))
        ));
        assert!(matches!(
            CodePair::parse("USDeur"),
            Err(DomainError::NotUppercase(_))
        ));
    }

    #[test]
    fn test_parse_pair_rejects_multibyte() {
        // Six bytes, but not six ASCII characters.
        assert!(matches!(
            CodePair::parse("USD€"),
            Err(DomainError::InvalidCodePair(_))
        ));
    }
}
