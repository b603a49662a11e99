//! # FX Types
//!
//! Domain types and port traits for the currency exchange service.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Currency, ExchangeRate, currency codes and validation
//! - `ports/` - Store traits that adapters must implement
//! - `dto/` - Wire shapes for requests and responses
//! - `error/` - Domain, repository and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    CodePair, Currency, CurrencyCode, CurrencyId, ExchangeRate, ExchangeRateId, validation,
};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use exchange_rates::{ANCHOR_CURRENCY, Strategy};
pub use ports::{CurrencyRepository, ExchangeRateRepository, ExchangeStore};
