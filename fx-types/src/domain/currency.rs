//! Currency domain model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::code::CurrencyCode;

/// Store-assigned identifier of a Currency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct CurrencyId(i64);

impl CurrencyId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CurrencyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A currency known to the service.
///
/// Currencies are immutable once stored: there is no update or delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Currency {
    /// Store-assigned identifier
    pub id: CurrencyId,
    /// ISO 4217 style code, unique across currencies
    pub code: CurrencyCode,
    /// Display name
    #[serde(rename = "name")]
    #[schema(example = "US Dollar")]
    pub full_name: String,
    /// Display symbol
    #[schema(example = "$")]
    pub sign: String,
}
