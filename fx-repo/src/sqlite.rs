//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use fx_types::{
    Currency, CurrencyCode, CurrencyId, CurrencyRepository, ExchangeRate, ExchangeRateRepository,
    RepoError,
};

use crate::cache::CurrencyCache;
use crate::types::{DbCurrency, DbExchangeRate, database_error, insert_error, statements};

const MIGRATIONS: [(&str, &str); 2] = [
    ("0001", include_str!("../migrations/0001_create_currencies.sql")),
    ("0002", include_str!("../migrations/0002_create_exchange_rates.sql")),
];

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
    cache: CurrencyCache,
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Runs all database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), anyhow::Error> {
    for (name, sql) in MIGRATIONS {
        for stmt in statements(sql) {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        Self::with_cache(database_url, CurrencyCache::new()).await
    }

    /// Creates a repository that fills the given (possibly shared) currency cache.
    pub async fn with_cache(database_url: &str, cache: CurrencyCache) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if !is_in_memory(database_url) {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to `:memory:` opens its own empty database, so an
        // in-memory store must live on exactly one connection that never expires.
        let pool_options = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(options).await?;

        run_migrations(&pool).await?;

        Ok(Self { pool, cache })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the currency id cache.
    pub fn cache(&self) -> &CurrencyCache {
        &self.cache
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        run_migrations(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Currency store
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl CurrencyRepository for SqliteRepo {
    async fn list_currencies(&self) -> Result<Vec<Currency>, RepoError> {
        let rows: Vec<DbCurrency> =
            sqlx::query_as(r#"SELECT id, code, full_name, sign FROM currencies ORDER BY id"#)
                .fetch_all(&self.pool)
                .await
                .map_err(database_error)?;

        rows.into_iter().map(DbCurrency::into_domain).collect()
    }

    async fn find_currency_by_code(&self, code: &CurrencyCode) -> Result<Currency, RepoError> {
        let row: Option<DbCurrency> =
            sqlx::query_as(r#"SELECT id, code, full_name, sign FROM currencies WHERE code = ?"#)
                .bind(code.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error)?;

        row.ok_or(RepoError::NotFound)?.into_domain()
    }

    async fn find_currency_by_id(&self, id: CurrencyId) -> Result<Currency, RepoError> {
        if let Some(currency) = self.cache.get(id) {
            return Ok(currency);
        }

        let row: Option<DbCurrency> =
            sqlx::query_as(r#"SELECT id, code, full_name, sign FROM currencies WHERE id = ?"#)
                .bind(id.get())
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error)?;

        let currency = row.ok_or(RepoError::NotFound)?.into_domain()?;
        self.cache.insert(currency.clone());
        tracing::debug!(currency_id = %id, code = %currency.code, "Cached currency");

        Ok(currency)
    }

    async fn save_currency(
        &self,
        full_name: &str,
        code: &CurrencyCode,
        sign: &str,
    ) -> Result<Currency, RepoError> {
        let row: DbCurrency = sqlx::query_as(
            r#"INSERT INTO currencies (full_name, code, sign) VALUES (?, ?, ?)
               RETURNING id, code, full_name, sign"#,
        )
        .bind(full_name)
        .bind(code.as_str())
        .bind(sign)
        .fetch_one(&self.pool)
        .await
        .map_err(insert_error)?;

        row.into_domain()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Exchange rate store
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ExchangeRateRepository for SqliteRepo {
    async fn list_exchange_rates(&self) -> Result<Vec<ExchangeRate>, RepoError> {
        let rows: Vec<DbExchangeRate> = sqlx::query_as(
            r#"SELECT id, base_currency_id, target_currency_id, rate FROM exchange_rates ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(DbExchangeRate::into_domain).collect())
    }

    async fn find_exchange_rate_by_codes(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<ExchangeRate, RepoError> {
        let row: Option<DbExchangeRate> = sqlx::query_as(
            r#"SELECT er.id, er.base_currency_id, er.target_currency_id, er.rate
               FROM exchange_rates er
               JOIN currencies bc ON bc.id = er.base_currency_id
               JOIN currencies tc ON tc.id = er.target_currency_id
               WHERE bc.code = ? AND tc.code = ?"#,
        )
        .bind(base.as_str())
        .bind(target.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(DbExchangeRate::into_domain).ok_or(RepoError::NotFound)
    }

    async fn save_exchange_rate(
        &self,
        base_id: CurrencyId,
        target_id: CurrencyId,
        rate: f64,
    ) -> Result<ExchangeRate, RepoError> {
        let row: DbExchangeRate = sqlx::query_as(
            r#"INSERT INTO exchange_rates (base_currency_id, target_currency_id, rate) VALUES (?, ?, ?)
               RETURNING id, base_currency_id, target_currency_id, rate"#,
        )
        .bind(base_id.get())
        .bind(target_id.get())
        .bind(rate)
        .fetch_one(&self.pool)
        .await
        .map_err(insert_error)?;

        Ok(row.into_domain())
    }

    async fn update_exchange_rate(
        &self,
        base_id: CurrencyId,
        target_id: CurrencyId,
        rate: f64,
    ) -> Result<ExchangeRate, RepoError> {
        let row: Option<DbExchangeRate> = sqlx::query_as(
            r#"UPDATE exchange_rates SET rate = ?
               WHERE base_currency_id = ? AND target_currency_id = ?
               RETURNING id, base_currency_id, target_currency_id, rate"#,
        )
        .bind(rate)
        .bind(base_id.get())
        .bind(target_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(DbExchangeRate::into_domain).ok_or(RepoError::NotFound)
    }
}
