//! # FX Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize logging (and OpenTelemetry export when configured)
//! - Initialize the store adapter
//! - Create the exchange service
//! - Start the HTTP server

mod config;

use std::time::Duration;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{Config, LogFormat};
use fx_hex::{
    ExchangeService,
    inbound::{HttpServer, RateLimiterState},
};
use fx_repo::build_repo;

fn init_tracer(endpoint: &str) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("fx-service"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize OpenTelemetry tracing, only when a collector is configured
    let otel = config
        .otlp_endpoint
        .as_deref()
        .map(init_tracer)
        .transpose()?;
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    // Initialize tracing subscriber
    let json = config.log_format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fx_app=debug,fx_hex=debug".into()),
        )
        .with((!json).then(tracing_subscriber::fmt::layer))
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with(telemetry)
        .init();

    tracing::info!("Starting exchange server on port {}", config.port);
    tracing::info!(
        rate_limit_per_minute = config.rate_limit_per_minute,
        trust_forwarded_for = config.trust_forwarded_for,
        otlp = config.otlp_endpoint.is_some(),
        "Configuration loaded"
    );

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;

    // Create the exchange service
    let service = ExchangeService::new(repo);

    // Create and run the HTTP server
    let rate_limiter = RateLimiterState::new(config.rate_limit_per_minute, Duration::from_secs(60))
        .trust_forwarded_for(config.trust_forwarded_for);
    let server = HttpServer::with_rate_limiter(service, rate_limiter);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }
    Ok(())
}
