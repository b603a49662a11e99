//! HTTP-level tests of the exchange API against an in-memory SQLite store.

use std::net::SocketAddr;

use axum::{
    Router,
    body::Body,
    extract::ConnectInfo,
    http::{Method, Request, StatusCode},
};
use fx_hex::{ExchangeService, inbound::HttpServer};
use fx_repo::SqliteRepo;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Helper to create a router over a fresh in-memory database.
async fn create_app(requests_per_minute: u32) -> Router {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    let service = ExchangeService::new(repo);
    HttpServer::with_rate_limit(service, requests_per_minute).router()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn form(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Adds USD, EUR and RUB.
async fn seed_currencies(app: &Router) {
    for body in [
        "name=US%20Dollar&code=USD&sign=%24",
        "name=Euro&code=EUR&sign=%E2%82%AC",
        "name=Russian%20Ruble&code=RUB&sign=%E2%82%BD",
    ] {
        let (status, _) = send(app, form(Method::POST, "/currency", body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

async fn seed_rate(app: &Router, base: &str, target: &str, rate: &str) {
    let body = format!("baseCurrencyCode={base}&targetCurrencyCode={target}&rate={rate}");
    let (status, _) = send(app, form(Method::POST, "/exchangeRates", &body)).await;
    assert_eq!(status, StatusCode::CREATED);
}

// ─────────────────────────────────────────────────────────────────────────────
// Currencies
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_add_and_get_currency() {
    let app = create_app(100).await;

    let (status, created) = send(
        &app,
        form(Method::POST, "/currencies", "name=Euro&code=EUR&sign=%E2%82%AC"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["code"], "EUR");
    assert_eq!(created["name"], "Euro");
    assert_eq!(created["sign"], "€");

    let (status, fetched) = send(&app, get("/currency/EUR")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_add_currency_on_both_routes() {
    let app = create_app(100).await;

    let (status, body) = send(&app, form(Method::POST, "/currency", "name=A&code=USD&sign=$")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], "USD");

    let (status, body) = send(
        &app,
        form(Method::POST, "/currencies", "name=Euro&code=EUR&sign=E"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], "EUR");
}

#[tokio::test]
async fn test_add_currency_conflict() {
    let app = create_app(100).await;
    seed_currencies(&app).await;

    let (status, body) = send(
        &app,
        form(Method::POST, "/currencies", "name=Dollar&code=USD&sign=%24"),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);
}

#[tokio::test]
async fn test_add_currency_missing_field() {
    let app = create_app(100).await;

    let (status, body) = send(&app, form(Method::POST, "/currencies", "name=Euro&sign=E")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Currency code is not present in the request");
}

#[tokio::test]
async fn test_get_unknown_currency() {
    let app = create_app(100).await;

    let (status, body) = send(&app, get("/currency/XYZ")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn test_list_currencies() {
    let app = create_app(100).await;
    seed_currencies(&app).await;

    let (status, body) = send(&app, get("/currencies")).await;

    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["USD", "EUR", "RUB"]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Exchange rates
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_add_and_get_exchange_rate() {
    let app = create_app(100).await;
    seed_currencies(&app).await;
    seed_rate(&app, "USD", "EUR", "0.93").await;

    let (status, body) = send(&app, get("/exchangeRate/USDEUR")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["baseCurrency"]["code"], "USD");
    assert_eq!(body["targetCurrency"]["code"], "EUR");
    assert_eq!(body["rate"], 0.93);
}

#[tokio::test]
async fn test_add_exchange_rate_errors() {
    let app = create_app(100).await;
    seed_currencies(&app).await;
    seed_rate(&app, "USD", "EUR", "0.93").await;

    let (status, _) = send(
        &app,
        form(
            Method::POST,
            "/exchangeRates",
            "baseCurrencyCode=USD&targetCurrencyCode=EUR&rate=0.95",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        form(
            Method::POST,
            "/exchangeRates",
            "baseCurrencyCode=USD&targetCurrencyCode=GBP&rate=0.79",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        form(
            Method::POST,
            "/exchangeRates",
            "baseCurrencyCode=USD&targetCurrencyCode=RUB&rate=0",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Rate cannot be negative or zero");
}

#[tokio::test]
async fn test_update_exchange_rate() {
    let app = create_app(100).await;
    seed_currencies(&app).await;
    seed_rate(&app, "USD", "EUR", "0.93").await;

    let (status, body) = send(&app, form(Method::PATCH, "/exchangeRate/USDEUR", "rate=0.95")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rate"], 0.95);

    let (status, _) = send(&app, form(Method::PATCH, "/exchangeRate/USDRUB", "rate=90")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, form(Method::PATCH, "/exchangeRate/USDEUR", "rate=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Couldn't parse rate from 'abc'");
}

#[tokio::test]
async fn test_update_exchange_rate_without_form_body() {
    let app = create_app(100).await;
    seed_currencies(&app).await;
    seed_rate(&app, "USD", "EUR", "0.93").await;

    let request = Request::builder()
        .method(Method::PATCH)
        .uri("/exchangeRate/USDEUR")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert!(body["error"].as_str().unwrap().starts_with("Malformed request"));

    let (status, body) = send(&app, form(Method::PATCH, "/exchangeRate/USDEUR", "")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Field 'rate' is not present in the request");
}

#[tokio::test]
async fn test_malformed_code_pair() {
    let app = create_app(100).await;

    let (status, _) = send(&app, get("/exchangeRate/USDEU")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_exchange_rates() {
    let app = create_app(100).await;
    seed_currencies(&app).await;
    seed_rate(&app, "USD", "EUR", "0.93").await;
    seed_rate(&app, "USD", "RUB", "90").await;

    let (status, body) = send(&app, get("/exchangeRates")).await;

    assert_eq!(status, StatusCode::OK);
    let rates = body.as_array().unwrap();
    assert_eq!(rates.len(), 2);
    assert_eq!(rates[1]["targetCurrency"]["name"], "Russian Ruble");
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_exchange_strategies() {
    let app = create_app(100).await;
    seed_currencies(&app).await;
    seed_rate(&app, "USD", "EUR", "0.93").await;
    seed_rate(&app, "USD", "RUB", "90").await;

    let (status, body) = send(&app, get("/exchange?from=USD&to=EUR&amount=100")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["convertedAmount"], 93.0);
    assert_eq!(body["strategy"], "DIRECT");

    let (_, body) = send(&app, get("/exchange?from=EUR&to=USD&amount=100")).await;
    assert_eq!(body["convertedAmount"], 107.53);
    assert_eq!(body["strategy"], "INVERSE");

    let (_, body) = send(&app, get("/exchange?from=RUB&to=EUR&amount=1000")).await;
    assert_eq!(body["convertedAmount"], 10.33);
    assert_eq!(body["strategy"], "CROSS");
    assert_eq!(body["baseCurrency"]["code"], "RUB");
    assert_eq!(body["amount"], 1000.0);
}

#[tokio::test]
async fn test_exchange_errors() {
    let app = create_app(100).await;
    seed_currencies(&app).await;

    let (status, _) = send(&app, get("/exchange?from=RUB&to=EUR&amount=10")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get("/exchange?from=USD&to=EUR&amount=-1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get("/exchange?from=USD&to=EUR")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_exchange_overflowing_amount() {
    let app = create_app(100).await;
    seed_currencies(&app).await;
    seed_rate(&app, "USD", "EUR", "10").await;

    let (status, body) = send(&app, get("/exchange?from=USD&to=EUR&amount=1e308")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

// ─────────────────────────────────────────────────────────────────────────────
// Middleware and docs
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_rate_limiting_returns_429_when_exceeded() {
    let app = create_app(3).await;

    for i in 1..=3 {
        let (status, _) = send(&app, get("/currencies")).await;
        assert_ne!(
            status,
            StatusCode::TOO_MANY_REQUESTS,
            "Request {} should not be rate limited (quota not yet exceeded)",
            i
        );
    }

    let (status, body) = send(&app, get("/currencies")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert!(body["error"].as_str().unwrap().contains("Rate limit exceeded"));
    assert_eq!(body["retry_after_seconds"], 60);
}

/// `GET /currencies` from `peer`, optionally carrying an `X-Forwarded-For` header.
fn from_peer(peer: &str, forwarded_for: Option<&str>) -> Request<Body> {
    let peer: SocketAddr = peer.parse().unwrap();
    let mut builder = Request::builder()
        .uri("/currencies")
        .extension(ConnectInfo(peer));
    if let Some(addr) = forwarded_for {
        builder = builder.header("X-Forwarded-For", addr);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_rate_limiting_is_per_client() {
    let app = create_app(1).await;

    let (status, _) = send(&app, from_peer("203.0.113.1:40000", None)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, from_peer("203.0.113.1:40001", None)).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    let (status, _) = send(&app, from_peer("203.0.113.2:40000", None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_rate_limiting_ignores_rotated_forwarded_for() {
    let app = create_app(1).await;

    let mut accepted = 0;
    for i in 0..50 {
        let forwarded = format!("1.2.3.{i}");
        let (status, _) = send(&app, from_peer("198.51.100.9:5000", Some(&forwarded))).await;
        if status != StatusCode::TOO_MANY_REQUESTS {
            accepted += 1;
        }
    }

    assert_eq!(accepted, 1);
}

#[tokio::test]
async fn test_rate_limiting_health_endpoint_bypassed() {
    let app = create_app(1).await;

    for _ in 0..10 {
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }
}

#[tokio::test]
async fn test_openapi_document() {
    let app = create_app(100).await;

    let (status, body) = send(&app, get("/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Currency Exchange Service API");
    assert!(body["paths"]["/exchange"].is_object());
}
