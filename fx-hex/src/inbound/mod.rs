//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

mod extract;
pub(crate) mod handlers;
mod rate_limit;
mod server;

pub use handlers::ApiError;
pub use rate_limit::RateLimiterState;
pub use server::HttpServer;
