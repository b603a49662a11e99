//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use fx_types::{
    Currency, CurrencyCode, CurrencyId, CurrencyRepository, ExchangeRate, ExchangeRateRepository,
    RepoError,
};

use crate::cache::CurrencyCache;
use crate::types::{DbCurrency, DbExchangeRate, database_error, insert_error, statements};

const MIGRATIONS: [(&str, &str); 2] = [
    ("0001", include_str!("../migrations/0001_create_currencies_pg.sql")),
    ("0002", include_str!("../migrations/0002_create_exchange_rates_pg.sql")),
];

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository; uniqueness is enforced by table constraints.
pub struct PostgresRepo {
    pool: PgPool,
    cache: CurrencyCache,
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
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

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        Self::with_cache(database_url, CurrencyCache::new()).await
    }

    /// Creates a repository that fills the given (possibly shared) currency cache.
    pub async fn with_cache(database_url: &str, cache: CurrencyCache) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool, cache })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

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
impl CurrencyRepository for PostgresRepo {
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
            sqlx::query_as(r#"SELECT id, code, full_name, sign FROM currencies WHERE code = $1"#)
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
            sqlx::query_as(r#"SELECT id, code, full_name, sign FROM currencies WHERE id = $1"#)
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
            r#"INSERT INTO currencies (full_name, code, sign) VALUES ($1, $2, $3)
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
impl ExchangeRateRepository for PostgresRepo {
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
               WHERE bc.code = $1 AND tc.code = $2"#,
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
            r#"INSERT INTO exchange_rates (base_currency_id, target_currency_id, rate) VALUES ($1, $2, $3)
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
            r#"UPDATE exchange_rates SET rate = $1
               WHERE base_currency_id = $2 AND target_currency_id = $3
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered_and_non_empty() {
        let names: Vec<&str> = MIGRATIONS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["0001", "0002"]);

        for (name, sql) in MIGRATIONS {
            assert!(statements(sql).count() > 0, "migration {name} is empty");
        }
    }
}
