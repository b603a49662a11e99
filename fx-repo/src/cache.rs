//! Read-through cache of currencies keyed by identifier.

use std::sync::Arc;

use dashmap::DashMap;
use fx_types::{Currency, CurrencyId};

/// Append-only `CurrencyId -> Currency` cache shared by clones.
///
/// Entries are never invalidated. That is only sound because currencies are
/// immutable and never deleted; if either ever changes, this cache has to go
/// or gain invalidation. Do not reuse it for exchange rates, which are mutable.
#[derive(Debug, Clone, Default)]
pub struct CurrencyCache {
    entries: Arc<DashMap<CurrencyId, Currency>>,
}

impl CurrencyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the cached currency, if any.
    pub fn get(&self, id: CurrencyId) -> Option<Currency> {
        self.entries.get(&id).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, currency: Currency) {
        self.entries.insert(currency.id, currency);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
