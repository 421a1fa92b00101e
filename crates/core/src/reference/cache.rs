//! Account-scoped classification caching using Moka.
//!
//! Classification choices depend on the selected account and are fetched
//! lazily the first time an account is picked in a session.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tally_shared::AppResult;
use tally_shared::config::CacheConfig;
use tally_shared::types::AccountId;
use tracing::debug;

use super::types::Classification;

/// Memoizing lookup of classifications per account.
#[derive(Clone)]
pub struct ClassificationCache {
    cache: Cache<AccountId, Arc<Vec<Classification>>>,
}

impl ClassificationCache {
    /// Creates a cache with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&CacheConfig::default())
    }

    /// Creates a cache from configuration.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_config(config.classification_capacity, config.classification_ttl_secs)
    }

    /// Creates a cache with custom capacity and time-to-live.
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Returns the cached classifications for an account, fetching on a miss.
    ///
    /// Failed fetches are not cached.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `fetch`.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        account_id: AccountId,
        fetch: F,
    ) -> AppResult<Arc<Vec<Classification>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<Vec<Classification>>>,
    {
        if let Some(cached) = self.cache.get(&account_id).await {
            return Ok(cached);
        }

        debug!(%account_id, "Classification cache miss");
        let fetched = Arc::new(fetch().await?);
        self.cache.insert(account_id, Arc::clone(&fetched)).await;

        Ok(fetched)
    }

    /// Drops the cached list for one account so the next lookup refetches it.
    pub async fn invalidate(&self, account_id: AccountId) {
        self.cache.invalidate(&account_id).await;
    }

    /// Returns the number of accounts currently cached.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs pending maintenance so `entry_count` is up to date.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}

impl Default for ClassificationCache {
    fn default() -> Self {
        Self::new()
    }
}
