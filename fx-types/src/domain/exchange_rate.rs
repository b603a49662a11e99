//! ExchangeRate domain model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::currency::CurrencyId;

/// Store-assigned identifier of an ExchangeRate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ExchangeRateId(i64);

impl ExchangeRateId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ExchangeRateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored, directional rate: `rate` units of target per 1 unit of base.
///
/// `(base_currency_id, target_currency_id)` is unique, and `(A, B)` and
/// `(B, A)` are separate records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub id: ExchangeRateId,
    pub base_currency_id: CurrencyId,
    pub target_currency_id: CurrencyId,
    pub rate: f64,
}
