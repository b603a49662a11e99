//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use fx_types::{
    AddCurrencyRequest, AddExchangeRateRequest, AppError, ErrorResponse, ExchangeQuery,
    ExchangeStore, UpdateExchangeRateRequest,
};

use super::extract::{ApiForm, ApiQuery};
use crate::ExchangeService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<R: ExchangeStore> {
    pub service: ExchangeService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::CurrencyNotFound(_)
            | AppError::ExchangeRateNotFound(_)
            | AppError::RateNotFound(_) => StatusCode::NOT_FOUND,
            AppError::CurrencyAlreadyExists(_) | AppError::ExchangeRateAlreadyExists(_) => {
                StatusCode::CONFLICT
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self.0 {
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorResponse {
            error: message,
            code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Serves the OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ─────────────────────────────────────────────────────────────────────────────
// Currencies
// ─────────────────────────────────────────────────────────────────────────────

/// List all currencies.
#[tracing::instrument(skip(state))]
pub async fn list_currencies<R: ExchangeStore>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let currencies = state.service.list_currencies().await?;
    Ok(Json(currencies))
}

/// Get currency by code.
#[tracing::instrument(skip(state))]
pub async fn get_currency<R: ExchangeStore>(
    State(state): State<Arc<AppState<R>>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let currency = state.service.get_currency(&code).await?;
    Ok(Json(currency))
}

/// Add a currency.
#[tracing::instrument(skip(state), fields(code = %req.code))]
pub async fn add_currency<R: ExchangeStore>(
    State(state): State<Arc<AppState<R>>>,
    ApiForm(req): ApiForm<AddCurrencyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let currency = state.service.add_currency(req).await?;
    tracing::info!(currency_id = %currency.id, "Currency added");
    Ok((StatusCode::CREATED, Json(currency)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Exchange rates
// ─────────────────────────────────────────────────────────────────────────────

/// List all exchange rates.
#[tracing::instrument(skip(state))]
pub async fn list_exchange_rates<R: ExchangeStore>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let rates = state.service.list_exchange_rates().await?;
    Ok(Json(rates))
}

/// Get the exchange rate of a code pair.
#[tracing::instrument(skip(state))]
pub async fn get_exchange_rate<R: ExchangeStore>(
    State(state): State<Arc<AppState<R>>>,
    Path(code_pair): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let rate = state.service.get_exchange_rate(&code_pair).await?;
    Ok(Json(rate))
}

/// Add an exchange rate.
#[tracing::instrument(
    skip(state),
    fields(base = %req.base_currency_code, target = %req.target_currency_code)
)]
pub async fn add_exchange_rate<R: ExchangeStore>(
    State(state): State<Arc<AppState<R>>>,
    ApiForm(req): ApiForm<AddExchangeRateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let rate = state.service.add_exchange_rate(req).await?;
    tracing::info!(exchange_rate_id = %rate.id, "Exchange rate added");
    Ok((StatusCode::CREATED, Json(rate)))
}

/// Update the rate of an existing exchange rate.
#[tracing::instrument(skip(state))]
pub async fn update_exchange_rate<R: ExchangeStore>(
    State(state): State<Arc<AppState<R>>>,
    Path(code_pair): Path<String>,
    ApiForm(req): ApiForm<UpdateExchangeRateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let rate = state.service.update_exchange_rate(&code_pair, req).await?;
    Ok(Json(rate))
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Convert an amount between two currencies.
#[tracing::instrument(skip(state), fields(from = %query.from, to = %query.to))]
pub async fn exchange<R: ExchangeStore>(
    State(state): State<Arc<AppState<R>>>,
    ApiQuery(query): ApiQuery<ExchangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.service.convert(query).await?;
    Ok(Json(result))
}
