//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use fx_types::domain::{Currency, CurrencyId, ExchangeRateId};
use fx_types::dto::{
    AddCurrencyRequest, AddExchangeRateRequest, ErrorResponse, ExchangeQuery, ExchangeRateResponse,
    ExchangeResponse, UpdateExchangeRateRequest,
};
use fx_types::Strategy;
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List all currencies
#[utoipa::path(
    get,
    path = "/currencies",
    tag = "currencies",
    responses(
        (status = 200, description = "All currencies in insertion order", body = Vec<Currency>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn list_currencies() {}

/// Get a currency by code
#[utoipa::path(
    get,
    path = "/currency/{code}",
    tag = "currencies",
    params(
        ("code" = String, Path, description = "Three uppercase letters", example = "USD")
    ),
    responses(
        (status = 200, description = "Currency details", body = Currency),
        (status = 400, description = "Malformed code", body = ErrorResponse),
        (status = 404, description = "Currency not found", body = ErrorResponse)
    )
)]
async fn get_currency() {}

/// Add a currency (also accepted on `POST /currencies`)
#[utoipa::path(
    post,
    path = "/currency",
    tag = "currencies",
    request_body(content = AddCurrencyRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Currency created", body = Currency),
        (status = 400, description = "Missing or malformed field", body = ErrorResponse),
        (status = 409, description = "Code already in use", body = ErrorResponse)
    )
)]
async fn add_currency() {}

/// List all exchange rates
#[utoipa::path(
    get,
    path = "/exchangeRates",
    tag = "exchange-rates",
    responses(
        (status = 200, description = "All exchange rates with their currencies", body = Vec<ExchangeRateResponse>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn list_exchange_rates() {}

/// Get the stored rate of an exact code pair
#[utoipa::path(
    get,
    path = "/exchangeRate/{code_pair}",
    tag = "exchange-rates",
    params(
        ("code_pair" = String, Path, description = "Base and target codes, e.g. USDEUR", example = "USDEUR")
    ),
    responses(
        (status = 200, description = "Exchange rate details", body = ExchangeRateResponse),
        (status = 400, description = "Malformed code pair", body = ErrorResponse),
        (status = 404, description = "Exchange rate not found", body = ErrorResponse)
    )
)]
async fn get_exchange_rate() {}

/// Add an exchange rate
#[utoipa::path(
    post,
    path = "/exchangeRates",
    tag = "exchange-rates",
    request_body(content = AddExchangeRateRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Exchange rate created", body = ExchangeRateResponse),
        (status = 400, description = "Missing or malformed field", body = ErrorResponse),
        (status = 404, description = "Currency not found", body = ErrorResponse),
        (status = 409, description = "Pair already has a rate", body = ErrorResponse)
    )
)]
async fn add_exchange_rate() {}

/// Replace the rate of an existing exchange rate
#[utoipa::path(
    patch,
    path = "/exchangeRate/{code_pair}",
    tag = "exchange-rates",
    params(
        ("code_pair" = String, Path, description = "Base and target codes, e.g. USDEUR", example = "USDEUR")
    ),
    request_body(content = UpdateExchangeRateRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Exchange rate updated", body = ExchangeRateResponse),
        (status = 400, description = "Malformed code pair or rate", body = ErrorResponse),
        (status = 404, description = "Currency or exchange rate not found", body = ErrorResponse)
    )
)]
async fn update_exchange_rate() {}

/// Convert an amount between two currencies
#[utoipa::path(
    get,
    path = "/exchange",
    tag = "exchange",
    params(ExchangeQuery),
    responses(
        (status = 200, description = "Conversion result", body = ExchangeResponse),
        (status = 400, description = "Malformed code or amount", body = ErrorResponse),
        (status = 404, description = "Unknown currency or no rate path", body = ErrorResponse)
    )
)]
async fn exchange() {}

/// OpenAPI documentation for the currency exchange API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency Exchange Service API",
        version = "1.0.0",
        description = "Currencies, exchange rates and conversions.\n\n## Conversion\n\nA conversion uses the stored `(from, to)` rate, else the reciprocal of `(to, from)`, else a cross rate through USD. Request bodies are form-encoded.",
        license(name = "MIT"),
    ),
    paths(
        health,
        list_currencies,
        get_currency,
        add_currency,
        list_exchange_rates,
        get_exchange_rate,
        add_exchange_rate,
        update_exchange_rate,
        exchange,
    ),
    components(
        schemas(
            Currency,
            CurrencyId,
            ExchangeRateId,
            AddCurrencyRequest,
            AddExchangeRateRequest,
            UpdateExchangeRateRequest,
            ExchangeRateResponse,
            ExchangeResponse,
            ErrorResponse,
            Strategy,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "currencies", description = "Currency management"),
        (name = "exchange-rates", description = "Exchange rate management"),
        (name = "exchange", description = "Amount conversion"),
    )
)]
pub struct ApiDoc;
