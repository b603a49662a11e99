//! Port traits (interfaces for adapters).
//!
//! These are the contracts that store adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod currency;
mod exchange_rate;

pub use currency::CurrencyRepository;
pub use exchange_rate::ExchangeRateRepository;

/// Everything the services need from storage.
///
/// Blanket-implemented for any type that implements both store ports.
pub trait ExchangeStore: CurrencyRepository + ExchangeRateRepository {}

impl<T: CurrencyRepository + ExchangeRateRepository> ExchangeStore for T {}
