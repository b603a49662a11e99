//! Client example demonstrating currency, rate and conversion flows against a running server.
//!
//! Run with: cargo run -p fx-app --example client_example --no-default-features --features sqlite

use fx_client::FxClient;
use fx_hex::{ExchangeService, inbound::HttpServer};
use fx_repo::build_repo;
use std::net::SocketAddr;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Bind an available port and hand the listener to the server
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("fx.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on {addr}...");
    println!("   Database: {db_url}");

    // Build repository (handles connection and migration)
    let repo = build_repo(&db_url).await?;

    // Start server in background
    let service = ExchangeService::new(repo);
    let router = HttpServer::new(service).router();

    let server = tokio::spawn(async move { axum::serve(listener, router.into_make_service()).await });

    let client = FxClient::new(format!("http://{addr}"));

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: currencies, rates, conversions
    // ─────────────────────────────────────────────────────────────────────────

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    for (code, name, sign) in [
        ("USD", "US Dollar", "$"),
        ("EUR", "Euro", "€"),
        ("RUB", "Russian Ruble", "₽"),
    ] {
        let currency = client.add_currency(name, code, sign).await?;
        println!("✅ Added currency: {} (id={})", currency.code, currency.id);
    }

    // Duplicate codes are rejected
    let duplicate = client.add_currency("Dollar", "USD", "$").await;
    if let Err(e) = &duplicate {
        println!("✅ Duplicate rejected: {e}");
    }

    client.add_exchange_rate("USD", "EUR", 0.93).await?;
    client.add_exchange_rate("USD", "RUB", 90.0).await?;
    println!("✅ Added rates USD→EUR 0.93 and USD→RUB 90.0");

    for (from, to, amount) in [("USD", "EUR", 100.0), ("EUR", "USD", 100.0), ("RUB", "EUR", 1000.0)]
    {
        let result = client.convert(from, to, amount).await?;
        println!(
            "   {amount} {from} = {} {to} (rate {:.6}, {})",
            result.converted_amount, result.rate, result.strategy
        );
    }

    let updated = client.update_exchange_rate("USDEUR", 0.95).await?;
    println!("✅ Updated USDEUR to {}", updated.rate);

    let rates = client.list_exchange_rates().await?;
    println!("\n📋 All exchange rates:");
    for rate in rates {
        println!(
            "   - {}{}: {}",
            rate.base_currency.code, rate.target_currency.code, rate.rate
        );
    }

    server.abort();
    println!("\n🎉 Example completed successfully!");

    Ok(())
}
