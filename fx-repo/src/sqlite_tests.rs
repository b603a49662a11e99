//! SQLite repository integration tests.

#[cfg(test)]
mod tests {
    use fx_types::{
        Currency, CurrencyCode, CurrencyId, CurrencyRepository, ExchangeRateRepository, RepoError,
    };

    use crate::SqliteRepo;

    async fn setup_repo() -> SqliteRepo {
        SqliteRepo::new("sqlite::memory:").await.unwrap()
    }

    fn code(raw: &str) -> CurrencyCode {
        CurrencyCode::parse(raw).unwrap()
    }

    async fn seed(repo: &SqliteRepo, raw: &str, name: &str, sign: &str) -> Currency {
        repo.save_currency(name, &code(raw), sign).await.unwrap()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Currencies
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_save_and_find_currency() {
        let repo = setup_repo().await;

        let saved = seed(&repo, "USD", "US Dollar", "$").await;
        let fetched = repo.find_currency_by_code(&code("USD")).await.unwrap();

        assert_eq!(fetched, saved);
        assert_eq!(fetched.full_name, "US Dollar");
        assert_eq!(fetched.sign, "$");
    }

    #[tokio::test]
    async fn test_find_currency_is_repeatable() {
        let repo = setup_repo().await;
        seed(&repo, "EUR", "Euro", "€").await;

        let first = repo.find_currency_by_code(&code("EUR")).await.unwrap();
        let second = repo.find_currency_by_code(&code("EUR")).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_duplicate_currency_code() {
        let repo = setup_repo().await;
        seed(&repo, "USD", "US Dollar", "$").await;

        let result = repo.save_currency("Other Dollar", &code("USD"), "$").await;

        assert!(matches!(result, Err(RepoError::AlreadyExists)));
        assert_eq!(repo.list_currencies().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_currency_not_found() {
        let repo = setup_repo().await;

        let by_code = repo.find_currency_by_code(&code("XYZ")).await;
        let by_id = repo.find_currency_by_id(CurrencyId::new(42)).await;

        assert!(matches!(by_code, Err(RepoError::NotFound)));
        assert!(matches!(by_id, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_currencies_in_insertion_order() {
        let repo = setup_repo().await;
        seed(&repo, "USD", "US Dollar", "$").await;
        seed(&repo, "EUR", "Euro", "€").await;
        seed(&repo, "RUB", "Russian Ruble", "₽").await;

        let codes: Vec<String> = repo
            .list_currencies()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.code.to_string())
            .collect();

        assert_eq!(codes, vec!["USD", "EUR", "RUB"]);
    }

    #[tokio::test]
    async fn test_find_by_id_fills_cache() {
        let repo = setup_repo().await;
        let usd = seed(&repo, "USD", "US Dollar", "$").await;
        assert!(repo.cache().is_empty());

        let fetched = repo.find_currency_by_id(usd.id).await.unwrap();

        assert_eq!(fetched, usd);
        assert_eq!(repo.cache().get(usd.id), Some(usd.clone()));

        // Served from cache even once the row is gone.
        sqlx::query("DELETE FROM currencies WHERE id = ?")
            .bind(usd.id.get())
            .execute(repo.pool())
            .await
            .unwrap();
        assert_eq!(repo.find_currency_by_id(usd.id).await.unwrap(), usd);
    }

    #[tokio::test]
    async fn test_create_schema_is_idempotent() {
        let repo = setup_repo().await;
        seed(&repo, "USD", "US Dollar", "$").await;

        repo.create_schema().await.unwrap();

        assert_eq!(repo.list_currencies().await.unwrap().len(), 1);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Exchange rates
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_save_and_find_exchange_rate() {
        let repo = setup_repo().await;
        let usd = seed(&repo, "USD", "US Dollar", "$").await;
        let eur = seed(&repo, "EUR", "Euro", "€").await;

        let saved = repo.save_exchange_rate(usd.id, eur.id, 0.93).await.unwrap();
        let fetched = repo
            .find_exchange_rate_by_codes(&code("USD"), &code("EUR"))
            .await
            .unwrap();

        assert_eq!(fetched.id, saved.id);
        assert_eq!(fetched.base_currency_id, usd.id);
        assert_eq!(fetched.target_currency_id, eur.id);
        assert_eq!(fetched.rate, 0.93);
    }

    #[tokio::test]
    async fn test_find_exchange_rate_matches_direction() {
        let repo = setup_repo().await;
        let usd = seed(&repo, "USD", "US Dollar", "$").await;
        let eur = seed(&repo, "EUR", "Euro", "€").await;
        repo.save_exchange_rate(usd.id, eur.id, 0.93).await.unwrap();

        let reversed = repo
            .find_exchange_rate_by_codes(&code("EUR"), &code("USD"))
            .await;

        assert!(matches!(reversed, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_duplicate_exchange_rate() {
        let repo = setup_repo().await;
        let usd = seed(&repo, "USD", "US Dollar", "$").await;
        let eur = seed(&repo, "EUR", "Euro", "€").await;
        repo.save_exchange_rate(usd.id, eur.id, 0.93).await.unwrap();

        let result = repo.save_exchange_rate(usd.id, eur.id, 0.95).await;

        assert!(matches!(result, Err(RepoError::AlreadyExists)));
    }

    #[tokio::test]
    async fn test_reverse_pair_is_a_distinct_rate() {
        let repo = setup_repo().await;
        let usd = seed(&repo, "USD", "US Dollar", "$").await;
        let eur = seed(&repo, "EUR", "Euro", "€").await;
        repo.save_exchange_rate(usd.id, eur.id, 0.93).await.unwrap();

        repo.save_exchange_rate(eur.id, usd.id, 1.07).await.unwrap();

        assert_eq!(repo.list_exchange_rates().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_exchange_rate() {
        let repo = setup_repo().await;
        let usd = seed(&repo, "USD", "US Dollar", "$").await;
        let eur = seed(&repo, "EUR", "Euro", "€").await;
        let saved = repo.save_exchange_rate(usd.id, eur.id, 0.93).await.unwrap();

        let updated = repo.update_exchange_rate(usd.id, eur.id, 0.95).await.unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.rate, 0.95);
        let fetched = repo
            .find_exchange_rate_by_codes(&code("USD"), &code("EUR"))
            .await
            .unwrap();
        assert_eq!(fetched.rate, 0.95);
    }

    #[tokio::test]
    async fn test_update_missing_exchange_rate() {
        let repo = setup_repo().await;
        let usd = seed(&repo, "USD", "US Dollar", "$").await;
        let eur = seed(&repo, "EUR", "Euro", "€").await;

        let result = repo.update_exchange_rate(usd.id, eur.id, 0.95).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
        assert!(repo.list_exchange_rates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rate_for_unknown_currency_is_rejected() {
        let repo = setup_repo().await;
        let usd = seed(&repo, "USD", "US Dollar", "$").await;

        let result = repo
            .save_exchange_rate(usd.id, CurrencyId::new(999), 1.5)
            .await;

        assert!(matches!(result, Err(RepoError::Database(_))));
    }

    #[tokio::test]
    async fn test_list_exchange_rates_in_insertion_order() {
        let repo = setup_repo().await;
        let usd = seed(&repo, "USD", "US Dollar", "$").await;
        let eur = seed(&repo, "EUR", "Euro", "€").await;
        let rub = seed(&repo, "RUB", "Russian Ruble", "₽").await;

        let first = repo.save_exchange_rate(usd.id, eur.id, 0.93).await.unwrap();
        let second = repo.save_exchange_rate(usd.id, rub.id, 90.0).await.unwrap();

        let ids: Vec<_> = repo
            .list_exchange_rates()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();

        assert_eq!(ids, vec![first.id, second.id]);
    }
}
