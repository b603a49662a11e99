//! HTTP Server configuration and startup.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use fx_types::ExchangeStore;

use super::handlers::{self, AppState};
use super::rate_limit::{RateLimiterState, cleanup_loop, rate_limit_middleware};
use crate::ExchangeService;

/// HTTP Server for the currency exchange API.
pub struct HttpServer<R: ExchangeStore> {
    state: Arc<AppState<R>>,
    rate_limiter: Arc<RateLimiterState>,
}

impl<R: ExchangeStore> HttpServer<R> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: ExchangeService<R>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            rate_limiter: Arc::new(RateLimiterState::default()), // 100 req/min default
        }
    }

    /// Creates a new HTTP server with custom rate limiting.
    pub fn with_rate_limit(service: ExchangeService<R>, requests_per_minute: u32) -> Self {
        Self::with_rate_limiter(
            service,
            RateLimiterState::new(requests_per_minute, Duration::from_secs(60)),
        )
    }

    /// Creates a new HTTP server with a preconfigured rate limiter.
    pub fn with_rate_limiter(service: ExchangeService<R>, rate_limiter: RateLimiterState) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            rate_limiter: Arc::new(rate_limiter),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .route(
                "/currencies",
                get(handlers::list_currencies::<R>).post(handlers::add_currency::<R>),
            )
            .route("/currency", post(handlers::add_currency::<R>))
            .route("/currency/{code}", get(handlers::get_currency::<R>))
            .route(
                "/exchangeRates",
                get(handlers::list_exchange_rates::<R>).post(handlers::add_exchange_rate::<R>),
            )
            .route(
                "/exchangeRate/{code_pair}",
                get(handlers::get_exchange_rate::<R>).patch(handlers::update_exchange_rate::<R>),
            )
            .route("/exchange", get(handlers::exchange::<R>))
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        let cleanup = tokio::spawn(cleanup_loop(self.rate_limiter.clone()));

        axum::serve(
            listener,
            self.router()
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        cleanup.abort();

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
