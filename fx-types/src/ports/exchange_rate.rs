//! Exchange rate store port.

use crate::domain::{CurrencyCode, CurrencyId, ExchangeRate};
use crate::error::RepoError;

/// Persistence and lookup of directional exchange rates.
#[async_trait::async_trait]
pub trait ExchangeRateRepository: Send + Sync + 'static {
    /// Lists every exchange rate in insertion order.
    async fn list_exchange_rates(&self) -> Result<Vec<ExchangeRate>, RepoError>;

    /// Finds the rate for exactly the ordered pair `(base, target)`.
    ///
    /// No inverse or cross fallback happens here.
    async fn find_exchange_rate_by_codes(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<ExchangeRate, RepoError>;

    /// Inserts a rate; [`RepoError::AlreadyExists`] if the ordered pair is taken.
    async fn save_exchange_rate(
        &self,
        base_id: CurrencyId,
        target_id: CurrencyId,
        rate: f64,
    ) -> Result<ExchangeRate, RepoError>;

    /// Replaces the rate of an existing pair; [`RepoError::NotFound`] if absent.
    async fn update_exchange_rate(
        &self,
        base_id: CurrencyId,
        target_id: CurrencyId,
        rate: f64,
    ) -> Result<ExchangeRate, RepoError>;
}
