//! Rate Resolver
//!
//! Converts an amount between two currencies by walking the fallback chain
//! in [`Strategy::ORDER`]: direct rate, inverse rate, then a cross rate
//! through [`fx_types::ANCHOR_CURRENCY`]. Legs are looked up lazily and the
//! first strategy whose legs are all stored wins.

use std::sync::Arc;

use exchange_rates::{Leg, convert_amount};
use fx_types::{
    AppError, CodePair, Currency, CurrencyCode, ExchangeResponse, ExchangeStore, RepoError,
    Strategy, validation,
};

/// Resolves conversion rates against an [`ExchangeStore`].
pub struct RateResolver<R: ExchangeStore> {
    repo: Arc<R>,
}

impl<R: ExchangeStore> Clone for RateResolver<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: ExchangeStore> RateResolver<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Converts `amount` of `base` into `target`.
    ///
    /// Both currencies must exist before any rate is looked up. The returned
    /// rate is unrounded; only `converted_amount` is rounded to cents.
    pub async fn convert(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
        amount: f64,
    ) -> Result<ExchangeResponse, AppError> {
        let amount = validation::validate_amount(amount)?;

        let base_currency = self.currency(base).await?;
        let target_currency = self.currency(target).await?;

        let (strategy, rate) = self
            .resolve_rate(base, target)
            .await?
            .ok_or_else(|| AppError::RateNotFound(CodePair::new(base.clone(), target.clone())))?;

        tracing::debug!(%base, %target, %strategy, rate, "Resolved exchange rate");

        let converted_amount =
            validation::validate_converted_amount(amount, convert_amount(amount, rate))?;

        Ok(ExchangeResponse {
            base_currency,
            target_currency,
            rate,
            amount,
            converted_amount,
            strategy,
        })
    }

    /// Finds the first strategy whose legs are all stored, with the rate it yields.
    ///
    /// `Ok(None)` means no strategy applies. Storage failures abort the walk.
    pub async fn resolve_rate(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<Option<(Strategy, f64)>, AppError> {
        'strategies: for strategy in Strategy::ORDER {
            let mut rates = Vec::with_capacity(strategy.leg_count());

            for leg in strategy.legs(base.as_str(), target.as_str()) {
                match self.stored_rate(leg).await? {
                    Some(rate) => rates.push(rate),
                    None => {
                        tracing::trace!(
                            %strategy,
                            leg_base = leg.base,
                            leg_target = leg.target,
                            "Missing leg"
                        );
                        continue 'strategies;
                    }
                }
            }

            let rate = strategy
                .combine(&rates)
                .map_err(|e| AppError::Internal(e.to_string()))?;
            return Ok(Some((strategy, rate)));
        }

        Ok(None)
    }

    async fn currency(&self, code: &CurrencyCode) -> Result<Currency, AppError> {
        self.repo
            .find_currency_by_code(code)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => AppError::CurrencyNotFound(code.clone()),
                other => other.into(),
            })
    }

    async fn stored_rate(&self, leg: Leg<'_>) -> Result<Option<f64>, AppError> {
        let base = CurrencyCode::parse(leg.base)?;
        let target = CurrencyCode::parse(leg.target)?;

        match self.repo.find_exchange_rate_by_codes(&base, &target).await {
            Ok(found) => Ok(Some(found.rate)),
            Err(RepoError::NotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
