//! Currency store port.

use crate::domain::{Currency, CurrencyCode, CurrencyId};
use crate::error::RepoError;

/// Persistence and lookup of currencies.
///
/// Uniqueness of `code` is enforced by the backend; a violation must come back
/// as [`RepoError::AlreadyExists`], never as a raw database error.
#[async_trait::async_trait]
pub trait CurrencyRepository: Send + Sync + 'static {
    /// Lists every currency in insertion order.
    async fn list_currencies(&self) -> Result<Vec<Currency>, RepoError>;

    /// Finds a currency by code, or [`RepoError::NotFound`].
    async fn find_currency_by_code(&self, code: &CurrencyCode) -> Result<Currency, RepoError>;

    /// Finds a currency by identifier, or [`RepoError::NotFound`].
    ///
    /// Implementations may serve this from a read-through cache.
    async fn find_currency_by_id(&self, id: CurrencyId) -> Result<Currency, RepoError>;

    /// Inserts a currency and returns it with its assigned identifier.
    async fn save_currency(
        &self,
        full_name: &str,
        code: &CurrencyCode,
        sign: &str,
    ) -> Result<Currency, RepoError>;
}
