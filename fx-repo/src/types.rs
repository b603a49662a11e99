//! Database row types and error mapping shared by both adapters.

use sqlx::FromRow;

use fx_types::{Currency, CurrencyCode, CurrencyId, ExchangeRate, ExchangeRateId, RepoError};

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Currency row from database.
#[derive(FromRow)]
pub struct DbCurrency {
    pub id: i64,
    pub code: String,
    pub full_name: String,
    pub sign: String,
}

/// Exchange rate row from database.
#[derive(FromRow)]
pub struct DbExchangeRate {
    pub id: i64,
    pub base_currency_id: i64,
    pub target_currency_id: i64,
    pub rate: f64,
}

impl DbCurrency {
    /// Convert database row to domain Currency.
    pub fn into_domain(self) -> Result<Currency, RepoError> {
        let code = CurrencyCode::parse(&self.code)
            .map_err(|e| RepoError::Database(format!("Stored currency {}: {}", self.id, e)))?;

        Ok(Currency {
            id: CurrencyId::new(self.id),
            code,
            full_name: self.full_name,
            sign: self.sign,
        })
    }
}

impl DbExchangeRate {
    /// Convert database row to domain ExchangeRate.
    pub fn into_domain(self) -> ExchangeRate {
        ExchangeRate {
            id: ExchangeRateId::new(self.id),
            base_currency_id: CurrencyId::new(self.base_currency_id),
            target_currency_id: CurrencyId::new(self.target_currency_id),
            rate: self.rate,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error mapping
// ─────────────────────────────────────────────────────────────────────────────

/// Maps a driver failure to [`RepoError::Database`], logging the detail.
pub fn database_error(err: sqlx::Error) -> RepoError {
    tracing::error!(error = %err, "Database operation failed");
    RepoError::Database(err.to_string())
}

/// Like [`database_error`], but surfaces uniqueness violations as
/// [`RepoError::AlreadyExists`].
pub fn insert_error(err: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return RepoError::AlreadyExists;
        }
    }
    database_error(err)
}

/// Splits a migration file into individual statements.
pub fn statements(sql: &str) -> impl Iterator<Item = &str> {
    sql.split(';').map(str::trim).filter(|s| !s.is_empty())
}
