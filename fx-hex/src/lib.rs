//! # FX Hex
//!
//! Application service layer and HTTP adapter for the currency exchange service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates store operations)
//! - `resolver/` - Rate resolution through the direct/inverse/cross fallback chain
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `R: ExchangeStore`, allowing
//! different store implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod resolver;
pub mod service;


pub use resolver::RateResolver;
pub use service::ExchangeService;
