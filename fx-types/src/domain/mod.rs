//! Domain models for the currency exchange service.

pub mod code;
pub mod currency;
pub mod exchange_rate;
pub mod validation;

pub use code::{CodePair, CurrencyCode};
pub use currency::{Currency, CurrencyId};
pub use exchange_rate::{ExchangeRate, ExchangeRateId};
