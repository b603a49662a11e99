//! Exchange Application Service
//!
//! Orchestrates currency and exchange rate operations through the store ports.
//! Contains NO infrastructure logic - pure business orchestration.

use std::sync::Arc;

use fx_types::{
    AddCurrencyRequest, AddExchangeRateRequest, AppError, CodePair, Currency, CurrencyCode,
    ExchangeQuery, ExchangeRate, ExchangeRateResponse, ExchangeResponse, ExchangeStore, RepoError,
    UpdateExchangeRateRequest, validation,
};

use crate::resolver::RateResolver;

/// Application service for currencies, exchange rates and conversions.
///
/// Generic over `R: ExchangeStore` - the adapter is injected at compile time.
/// This enables:
/// - Swapping stores without code changes
/// - Testing with an in-memory store
/// - Compile-time checks for port implementation
pub struct ExchangeService<R: ExchangeStore> {
    repo: Arc<R>,
    resolver: RateResolver<R>,
}

impl<R: ExchangeStore> ExchangeService<R> {
    /// Creates a new exchange service with the given store.
    pub fn new(repo: R) -> Self {
        let repo = Arc::new(repo);
        Self {
            resolver: RateResolver::new(Arc::clone(&repo)),
            repo,
        }
    }

    /// Returns a reference to the underlying store.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn resolver(&self) -> &RateResolver<R> {
        &self.resolver
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Currency Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists all currencies in insertion order.
    pub async fn list_currencies(&self) -> Result<Vec<Currency>, AppError> {
        self.repo.list_currencies().await.map_err(Into::into)
    }

    /// Gets a currency by its code.
    pub async fn get_currency(&self, code: &str) -> Result<Currency, AppError> {
        let code = CurrencyCode::parse(code)?;
        self.find_currency(&code).await
    }

    /// Adds a new currency.
    pub async fn add_currency(&self, req: AddCurrencyRequest) -> Result<Currency, AppError> {
        let name = validation::require_non_empty("name", &req.name)?;
        let code = CurrencyCode::parse(req.code.trim())?;
        let sign = validation::require_non_empty("sign", &req.sign)?;

        self.repo
            .save_currency(name, &code, sign)
            .await
            .map_err(|e| match e {
                RepoError::AlreadyExists => AppError::CurrencyAlreadyExists(code.clone()),
                other => other.into(),
            })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Exchange Rate Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists all exchange rates with their currencies resolved.
    pub async fn list_exchange_rates(&self) -> Result<Vec<ExchangeRateResponse>, AppError> {
        let rates = self.repo.list_exchange_rates().await?;

        let mut responses = Vec::with_capacity(rates.len());
        for rate in rates {
            responses.push(self.hydrate(rate).await?);
        }
        Ok(responses)
    }

    /// Gets the stored rate for an exact code pair such as `USDEUR`.
    ///
    /// No inverse or cross fallback applies here.
    pub async fn get_exchange_rate(&self, code_pair: &str) -> Result<ExchangeRateResponse, AppError> {
        let pair = CodePair::parse(code_pair)?;

        let rate = self
            .repo
            .find_exchange_rate_by_codes(&pair.base, &pair.target)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => AppError::ExchangeRateNotFound(pair.clone()),
                other => other.into(),
            })?;

        self.hydrate(rate).await
    }

    /// Adds a new exchange rate between two existing currencies.
    pub async fn add_exchange_rate(
        &self,
        req: AddExchangeRateRequest,
    ) -> Result<ExchangeRateResponse, AppError> {
        let base = CurrencyCode::parse(req.base_currency_code.trim())?;
        let target = CurrencyCode::parse(req.target_currency_code.trim())?;
        let rate = validation::validate_rate(req.parsed_rate()?)?;

        let base_currency = self.find_currency(&base).await?;
        let target_currency = self.find_currency(&target).await?;

        let saved = self
            .repo
            .save_exchange_rate(base_currency.id, target_currency.id, rate)
            .await
            .map_err(|e| match e {
                RepoError::AlreadyExists => {
                    AppError::ExchangeRateAlreadyExists(CodePair::new(base.clone(), target.clone()))
                }
                other => other.into(),
            })?;

        Ok(ExchangeRateResponse {
            id: saved.id,
            base_currency,
            target_currency,
            rate: saved.rate,
        })
    }

    /// Replaces the rate of an existing exchange rate.
    pub async fn update_exchange_rate(
        &self,
        code_pair: &str,
        req: UpdateExchangeRateRequest,
    ) -> Result<ExchangeRateResponse, AppError> {
        let pair = CodePair::parse(code_pair)?;
        let rate = validation::validate_rate(req.parsed_rate()?)?;

        let base_currency = self.find_currency(&pair.base).await?;
        let target_currency = self.find_currency(&pair.target).await?;

        let updated = self
            .repo
            .update_exchange_rate(base_currency.id, target_currency.id, rate)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => AppError::ExchangeRateNotFound(pair.clone()),
                other => other.into(),
            })?;

        tracing::info!(pair = %pair, rate = updated.rate, "Exchange rate updated");

        Ok(ExchangeRateResponse {
            id: updated.id,
            base_currency,
            target_currency,
            rate: updated.rate,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts an amount using the resolver's fallback chain.
    pub async fn convert(&self, query: ExchangeQuery) -> Result<ExchangeResponse, AppError> {
        let base = CurrencyCode::parse(query.from.trim())?;
        let target = CurrencyCode::parse(query.to.trim())?;
        let amount = query.parsed_amount()?;

        self.resolver.convert(&base, &target, amount).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────────

    async fn find_currency(&self, code: &CurrencyCode) -> Result<Currency, AppError> {
        self.repo
            .find_currency_by_code(code)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => AppError::CurrencyNotFound(code.clone()),
                other => other.into(),
            })
    }

    /// Resolves both currencies of a stored rate through the id lookup.
    async fn hydrate(&self, rate: ExchangeRate) -> Result<ExchangeRateResponse, AppError> {
        let base_currency = self.repo.find_currency_by_id(rate.base_currency_id).await?;
        let target_currency = self.repo.find_currency_by_id(rate.target_currency_id).await?;

        Ok(ExchangeRateResponse {
            id: rate.id,
            base_currency,
            target_currency,
            rate: rate.rate,
        })
    }
}
