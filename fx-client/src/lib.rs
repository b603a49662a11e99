//! # FX Client SDK
//!
//! A typed Rust client for the currency exchange API.

use fx_types::{
    AddCurrencyRequest, AddExchangeRateRequest, Currency, ExchangeQuery, ExchangeRateResponse,
    ExchangeResponse, UpdateExchangeRateRequest,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Currency exchange API client.
pub struct FxClient {
    base_url: String,
    http: Client,
}

impl FxClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self.http.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Currencies
    // ─────────────────────────────────────────────────────────────────────────

    /// Lists all currencies.
    pub async fn list_currencies(&self) -> Result<Vec<Currency>, ClientError> {
        self.send(self.http.get(self.url("/currencies"))).await
    }

    /// Gets a currency by code.
    pub async fn get_currency(&self, code: &str) -> Result<Currency, ClientError> {
        self.send(self.http.get(self.url(&format!("/currency/{}", code))))
            .await
    }

    /// Adds a currency.
    pub async fn add_currency(
        &self,
        name: &str,
        code: &str,
        sign: &str,
    ) -> Result<Currency, ClientError> {
        let req = AddCurrencyRequest {
            name: name.to_string(),
            code: code.to_string(),
            sign: sign.to_string(),
        };
        self.send(self.http.post(self.url("/currency")).form(&req))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Exchange rates
    // ─────────────────────────────────────────────────────────────────────────

    /// Lists all exchange rates.
    pub async fn list_exchange_rates(&self) -> Result<Vec<ExchangeRateResponse>, ClientError> {
        self.send(self.http.get(self.url("/exchangeRates"))).await
    }

    /// Gets the stored rate of a code pair such as `USDEUR`.
    pub async fn get_exchange_rate(
        &self,
        code_pair: &str,
    ) -> Result<ExchangeRateResponse, ClientError> {
        self.send(self.http.get(self.url(&format!("/exchangeRate/{}", code_pair))))
            .await
    }

    /// Adds an exchange rate: `rate` units of `target` per 1 `base`.
    pub async fn add_exchange_rate(
        &self,
        base: &str,
        target: &str,
        rate: f64,
    ) -> Result<ExchangeRateResponse, ClientError> {
        let req = AddExchangeRateRequest {
            base_currency_code: base.to_string(),
            target_currency_code: target.to_string(),
            rate: rate.to_string(),
        };
        self.send(self.http.post(self.url("/exchangeRates")).form(&req))
            .await
    }

    /// Replaces the rate of an existing exchange rate.
    pub async fn update_exchange_rate(
        &self,
        code_pair: &str,
        rate: f64,
    ) -> Result<ExchangeRateResponse, ClientError> {
        let req = UpdateExchangeRateRequest {
            rate: rate.to_string(),
        };
        self.send(
            self.http
                .patch(self.url(&format!("/exchangeRate/{}", code_pair)))
                .form(&req),
        )
        .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────

    /// Converts `amount` of `from` into `to`.
    pub async fn convert(
        &self,
        from: &str,
        to: &str,
        amount: f64,
    ) -> Result<ExchangeResponse, ClientError> {
        let query = ExchangeQuery {
            from: from.to_string(),
            to: to.to_string(),
            amount: amount.to_string(),
        };
        self.send(self.http.get(self.url("/exchange")).query(&query))
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(body),
            })
        }
    }
}

/// Extracts `error` from an error body, falling back to the raw body.
fn error_message(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = FxClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = FxClient::new("http://localhost:3000/");
        assert_eq!(client.url("/currencies"), "http://localhost:3000/currencies");
    }

    #[test]
    fn test_error_message_from_api_body() {
        let body = r#"{"error":"Currency not found: XYZ","code":404}"#.to_string();
        assert_eq!(error_message(body), "Currency not found: XYZ");
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("Bad Gateway".to_string()), "Bad Gateway");
    }
}
