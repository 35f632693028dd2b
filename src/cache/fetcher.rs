//! Read-through response cache over any [`FetchApi`]
//!
//! Responses are stored in the key-value store next to the session, keyed by
//! the literal request URL. A fresh entry is served without touching the
//! network; anything else goes to the backend once and, on success, replaces
//! the entry. Concurrent requests for the same URL share one network call.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use serde_json::Value;

use super::key::{body_keys, cache_key, is_cache_key, timestamp_key};
use crate::client::FetchApi;
use crate::error::{Error, Result, SharedResult};
use crate::storage::KeyValueStore;

/// How a single fetch interacts with the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// Serve a fresh entry if there is one, otherwise fetch and store
    #[default]
    CacheFirst,
    /// Skip the read, always fetch, store the result
    Refresh,
    /// Neither read nor write the cache
    NoCache,
}

type InFlight = Shared<BoxFuture<'static, SharedResult<Value>>>;

/// Cache statistics for display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub fresh_entries: usize,
    pub stale_entries: usize,
    pub total_size_bytes: usize,
    /// Epoch millis of the oldest stored response
    pub oldest_entry: Option<i64>,
    /// Epoch millis of the newest stored response
    pub newest_entry: Option<i64>,
}

/// Result of clearing the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// Cache-aware fetcher shared by every consumer in the process.
///
/// The store is optional: without one (`--no-cache`) every call goes to the
/// network, but single-flight still applies.
pub struct CachedFetcher<C: FetchApi + 'static> {
    inner: Arc<C>,
    store: Option<Arc<dyn KeyValueStore>>,
    ttl: Duration,
    in_flight: Arc<Mutex<HashMap<String, InFlight>>>,
}

impl<C: FetchApi + 'static> CachedFetcher<C> {
    /// Create a fetcher over `inner`, caching into `store` for `ttl`
    pub fn new(inner: Arc<C>, store: Option<Arc<dyn KeyValueStore>>, ttl: Duration) -> Self {
        Self {
            inner,
            store,
            ttl,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Fetch `url` with the default cache-first policy
    pub async fn fetch(&self, url: &str) -> Result<Value> {
        self.fetch_with(url, FetchMode::CacheFirst, None).await
    }

    /// Fetch `url` with an explicit mode and optional TTL override
    pub async fn fetch_with(
        &self,
        url: &str,
        mode: FetchMode,
        ttl: Option<Duration>,
    ) -> Result<Value> {
        let ttl = ttl.unwrap_or(self.ttl);

        if mode == FetchMode::CacheFirst
            && let Some(data) = self.cached(url, ttl)
        {
            log::debug!("Cache hit: {}", url);
            return Ok(data);
        }

        if mode == FetchMode::NoCache {
            log::debug!("Uncached fetch: {}", url);
            return self.inner.fetch(url).await;
        }

        log::debug!("Cache miss: {}", url);
        self.load(url).await.map_err(Error::Shared)
    }

    /// Fresh cached body for `url`, if any.
    ///
    /// Entries are fresh while `now - stored_at < ttl`. A body that no longer
    /// parses is treated as a miss.
    pub fn cached(&self, url: &str, ttl: Duration) -> Option<Value> {
        let store = self.store.as_ref()?;

        let stored_at = match store.get(&timestamp_key(url)) {
            Ok(Some(raw)) => raw.trim().parse::<i64>().ok()?,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read cache timestamp for {}: {}", url, e);
                return None;
            }
        };

        let age_ms = Utc::now().timestamp_millis().saturating_sub(stored_at);
        if age_ms >= ttl_millis(ttl) {
            return None;
        }

        let raw = match store.get(cache_key(url)) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("Failed to read cache entry for {}: {}", url, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Discarding unreadable cache entry for {}: {}", url, e);
                None
            }
        }
    }

    /// Join the in-flight request for `url` or start one
    async fn load(&self, url: &str) -> SharedResult<Value> {
        let request = {
            let mut pending = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
            match pending.get(url) {
                Some(existing) => {
                    log::debug!("Joining in-flight request: {}", url);
                    existing.clone()
                }
                None => {
                    let request = self.spawn_request(url);
                    pending.insert(url.to_string(), request.clone());
                    request
                }
            }
        };

        request.await
    }

    /// Run the network call on its own task so it completes even if every
    /// caller goes away, then persist and clear the pending slot.
    fn spawn_request(&self, url: &str) -> InFlight {
        let inner = self.inner.clone();
        let store = self.store.clone();
        let in_flight = self.in_flight.clone();
        let url = url.to_string();

        let task = tokio::spawn(async move {
            let result = inner.fetch(&url).await;

            if let (Ok(body), Some(store)) = (&result, store.as_deref()) {
                write_entry(store, &url, body);
            }

            in_flight
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .remove(&url);

            result.map_err(Arc::new)
        });

        async move {
            match task.await {
                Ok(result) => result,
                Err(e) => Err(Arc::new(Error::Other(format!("Fetch task failed: {}", e)))),
            }
        }
        .boxed()
        .shared()
    }

    /// Summarize the cached responses
    pub fn stats(&self) -> Result<CacheStats> {
        let Some(store) = self.store.as_ref() else {
            return Ok(CacheStats::default());
        };

        let now = Utc::now().timestamp_millis();
        let ttl_ms = ttl_millis(self.ttl);
        let mut stats = CacheStats::default();

        let keys = store.keys()?;
        for key in body_keys(&keys) {
            let size = store.get(key)?.map(|v| v.len()).unwrap_or(0);
            let stored_at = store
                .get(&timestamp_key(key))?
                .and_then(|raw| raw.trim().parse::<i64>().ok());

            stats.total_entries += 1;
            stats.total_size_bytes += size;

            match stored_at {
                Some(ts) => {
                    if now.saturating_sub(ts) < ttl_ms {
                        stats.fresh_entries += 1;
                    } else {
                        stats.stale_entries += 1;
                    }
                    stats.oldest_entry = Some(stats.oldest_entry.map_or(ts, |o| o.min(ts)));
                    stats.newest_entry = Some(stats.newest_entry.map_or(ts, |n| n.max(ts)));
                }
                None => stats.stale_entries += 1,
            }
        }

        Ok(stats)
    }

    /// Remove every cached response, leaving the session keys alone
    pub fn clear(&self) -> Result<ClearStats> {
        let Some(store) = self.store.as_ref() else {
            return Ok(ClearStats { entries_removed: 0 });
        };

        let keys = store.keys()?;
        let entries_removed = body_keys(&keys).len();
        for key in keys.iter().filter(|k| is_cache_key(k)) {
            store.remove(key)?;
        }

        log::debug!("Cleared {} cached responses", entries_removed);
        Ok(ClearStats { entries_removed })
    }
}

/// TTL in milliseconds; anything past `i64::MAX` never expires
fn ttl_millis(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX)
}

/// Persist a body and its timestamp; failures only cost a future cache hit.
fn write_entry(store: &dyn KeyValueStore, url: &str, body: &Value) {
    let raw = match serde_json::to_string(body) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("Failed to serialize response for {}: {}", url, e);
            return;
        }
    };

    let now = Utc::now().timestamp_millis().to_string();
    if let Err(e) = store
        .set(cache_key(url), &raw)
        .and_then(|()| store.set(&timestamp_key(url), &now))
    {
        log::warn!("Failed to cache response for {}: {}", url, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockCricketClient;
    use crate::error::ApiError;
    use crate::storage::MemoryStore;
    use serde_json::json;

    const TTL: Duration = Duration::from_secs(300);

    async fn setup(
        responses: &[(&str, Value)],
    ) -> (
        CachedFetcher<MockCricketClient>,
        Arc<MockCricketClient>,
        Arc<MemoryStore>,
    ) {
        let mut mock = MockCricketClient::new();
        for (path, body) in responses {
            mock = mock.with_response(path, body.clone()).await;
        }
        let mock = Arc::new(mock);
        let store = Arc::new(MemoryStore::new());
        let fetcher = CachedFetcher::new(mock.clone(), Some(store.clone()), TTL);
        (fetcher, mock, store)
    }

    fn minutes_ago(minutes: i64) -> String {
        (Utc::now().timestamp_millis() - minutes * 60_000).to_string()
    }

    #[tokio::test]
    async fn test_cold_fetch_stores_body_and_timestamp() {
        let url = "/api/v1/cricket/live";
        let (fetcher, mock, store) = setup(&[(url, json!([{"id": 1}]))]).await;

        let before = Utc::now().timestamp_millis();
        let body = fetcher.fetch(url).await.unwrap();

        assert_eq!(body, json!([{"id": 1}]));
        assert_eq!(mock.fetch_count(url).await, 1);
        assert_eq!(store.get(url).unwrap().as_deref(), Some(r#"[{"id":1}]"#));

        let stored_at: i64 = store
            .get("/api/v1/cricket/live_timestamp")
            .unwrap()
            .unwrap()
            .parse()
            .unwrap();
        assert!(stored_at >= before);
        assert!(stored_at <= Utc::now().timestamp_millis());
    }

    #[tokio::test]
    async fn test_fresh_entry_served_without_network() {
        let (fetcher, mock, store) = setup(&[("/x", json!({"score": 2}))]).await;
        store.set("/x", r#"{"score":1}"#).unwrap();
        store.set("/x_timestamp", &minutes_ago(1)).unwrap();

        let body = fetcher.fetch("/x").await.unwrap();

        assert_eq!(body, json!({"score": 1}));
        assert_eq!(mock.total_fetches().await, 0);
    }

    #[tokio::test]
    async fn test_repeat_fetch_within_ttl_hits_network_once() {
        let (fetcher, mock, _) = setup(&[("/x", json!({"score": 1}))]).await;

        let first = fetcher.fetch("/x").await.unwrap();
        let second = fetcher.fetch("/x").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(mock.fetch_count("/x").await, 1);
    }

    #[tokio::test]
    async fn test_stale_entry_refetched_and_overwritten() {
        let (fetcher, mock, store) = setup(&[("/x", json!({"score": 9}))]).await;
        store.set("/x", r#"{"score":1}"#).unwrap();
        let old = minutes_ago(10);
        store.set("/x_timestamp", &old).unwrap();

        let body = fetcher.fetch("/x").await.unwrap();

        assert_eq!(body, json!({"score": 9}));
        assert_eq!(mock.fetch_count("/x").await, 1);
        assert_eq!(store.get("/x").unwrap().as_deref(), Some(r#"{"score":9}"#));
        assert_ne!(store.get("/x_timestamp").unwrap().unwrap(), old);
    }

    #[tokio::test]
    async fn test_entry_at_exact_ttl_is_stale() {
        let (fetcher, _, store) = setup(&[]).await;
        store.set("/x", "1").unwrap();
        store.set("/x_timestamp", &minutes_ago(5)).unwrap();

        assert!(fetcher.cached("/x", TTL).is_none());
        assert!(fetcher.cached("/x", Duration::from_secs(600)).is_some());
    }

    #[tokio::test]
    async fn test_huge_ttl_keeps_entries_fresh() {
        let mock = Arc::new(
            MockCricketClient::new()
                .with_response("/x", json!({"score": 1}))
                .await,
        );
        let store = Arc::new(MemoryStore::new());
        let fetcher = CachedFetcher::new(
            mock.clone(),
            Some(store.clone()),
            Duration::from_secs(u64::MAX),
        );

        fetcher.fetch("/x").await.unwrap();
        fetcher.fetch("/x").await.unwrap();
        assert_eq!(mock.fetch_count("/x").await, 1);

        store.set("/old", "1").unwrap();
        store.set("/old_timestamp", &minutes_ago(60 * 24 * 365)).unwrap();
        let stats = fetcher.stats().unwrap();
        assert_eq!(stats.fresh_entries, 2);
        assert_eq!(stats.stale_entries, 0);
    }

    #[test]
    fn test_ttl_millis_saturates() {
        assert_eq!(ttl_millis(Duration::from_secs(2)), 2_000);
        assert_eq!(ttl_millis(Duration::from_secs(u64::MAX)), i64::MAX);
        assert_eq!(
            ttl_millis(Duration::from_secs(10_000_000_000_000_000)),
            i64::MAX
        );
    }

    #[tokio::test]
    async fn test_failure_persists_nothing() {
        let (fetcher, mock, store) = setup(&[]).await;
        mock.set_failure("/x", ApiError::ServerError("boom".into()))
            .await;

        let err = fetcher.fetch("/x").await.unwrap_err();

        assert!(err.to_string().contains("boom"));
        assert!(store.get("/x").unwrap().is_none());
        assert!(store.get("/x_timestamp").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_a_miss() {
        let (fetcher, mock, store) = setup(&[("/x", json!({"ok": true}))]).await;
        store.set("/x", "{not json").unwrap();
        store.set("/x_timestamp", &minutes_ago(0)).unwrap();

        let body = fetcher.fetch("/x").await.unwrap();

        assert_eq!(body, json!({"ok": true}));
        assert_eq!(mock.fetch_count("/x").await, 1);
    }

    #[tokio::test]
    async fn test_refresh_skips_read_but_writes() {
        let (fetcher, mock, store) = setup(&[("/x", json!(2))]).await;
        store.set("/x", "1").unwrap();
        store.set("/x_timestamp", &minutes_ago(0)).unwrap();

        let body = fetcher
            .fetch_with("/x", FetchMode::Refresh, None)
            .await
            .unwrap();

        assert_eq!(body, json!(2));
        assert_eq!(mock.fetch_count("/x").await, 1);
        assert_eq!(store.get("/x").unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_no_cache_neither_reads_nor_writes() {
        let (fetcher, mock, store) = setup(&[("/x", json!(2))]).await;
        store.set("/x", "1").unwrap();
        let stamp = minutes_ago(0);
        store.set("/x_timestamp", &stamp).unwrap();

        let body = fetcher
            .fetch_with("/x", FetchMode::NoCache, None)
            .await
            .unwrap();

        assert_eq!(body, json!(2));
        assert_eq!(mock.fetch_count("/x").await, 1);
        assert_eq!(store.get("/x").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("/x_timestamp").unwrap(), Some(stamp));
    }

    #[tokio::test]
    async fn test_ttl_override() {
        let (fetcher, mock, store) = setup(&[("/x", json!(2))]).await;
        store.set("/x", "1").unwrap();
        store.set("/x_timestamp", &minutes_ago(2)).unwrap();

        let body = fetcher
            .fetch_with("/x", FetchMode::CacheFirst, Some(Duration::from_secs(60)))
            .await
            .unwrap();

        assert_eq!(body, json!(2));
        assert_eq!(mock.fetch_count("/x").await, 1);
    }

    #[tokio::test]
    async fn test_without_store_always_fetches() {
        let mock = Arc::new(MockCricketClient::new().with_response("/x", json!(1)).await);
        let fetcher = CachedFetcher::new(mock.clone(), None, TTL);

        fetcher.fetch("/x").await.unwrap();
        fetcher.fetch("/x").await.unwrap();

        assert!(!fetcher.is_enabled());
        assert_eq!(mock.fetch_count("/x").await, 2);
    }

    #[tokio::test]
    async fn test_concurrent_cold_requests_share_one_call() {
        let mock = Arc::new(
            MockCricketClient::new()
                .with_response("/api/v1/cricket/series", json!({"data": []}))
                .await
                .with_delay(Duration::from_millis(50))
                .await,
        );
        let store = Arc::new(MemoryStore::new());
        let fetcher = CachedFetcher::new(mock.clone(), Some(store), TTL);

        let (a, b, c) = tokio::join!(
            fetcher.fetch("/api/v1/cricket/series"),
            fetcher.fetch("/api/v1/cricket/series"),
            fetcher.fetch("/api/v1/cricket/series"),
        );

        assert_eq!(a.unwrap(), json!({"data": []}));
        assert_eq!(b.unwrap(), json!({"data": []}));
        assert_eq!(c.unwrap(), json!({"data": []}));
        assert_eq!(mock.fetch_count("/api/v1/cricket/series").await, 1);
    }

    #[tokio::test]
    async fn test_shared_failure_reaches_every_caller() {
        let mock = Arc::new(
            MockCricketClient::new()
                .with_delay(Duration::from_millis(20))
                .await,
        );
        mock.set_failure("/x", ApiError::Unauthorized).await;
        let fetcher = CachedFetcher::new(mock.clone(), None, TTL);

        let (a, b) = tokio::join!(fetcher.fetch("/x"), fetcher.fetch("/x"));

        assert!(a.unwrap_err().is_unauthorized());
        assert!(b.unwrap_err().is_unauthorized());
        assert_eq!(mock.fetch_count("/x").await, 1);
    }

    #[tokio::test]
    async fn test_stats_and_clear_leave_session_keys() {
        let (fetcher, _, store) = setup(&[]).await;
        store.set("token", "jwt").unwrap();
        store.set("user", r#"{"username":"a"}"#).unwrap();
        store.set("/fresh", "12345").unwrap();
        store.set("/fresh_timestamp", &minutes_ago(1)).unwrap();
        store.set("/stale", "1").unwrap();
        store.set("/stale_timestamp", &minutes_ago(30)).unwrap();

        let stats = fetcher.stats().unwrap();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.fresh_entries, 1);
        assert_eq!(stats.stale_entries, 1);
        assert_eq!(stats.total_size_bytes, 6);
        assert!(stats.oldest_entry < stats.newest_entry);

        let cleared = fetcher.clear().unwrap();
        assert_eq!(cleared.entries_removed, 2);
        assert_eq!(store.keys().unwrap(), vec!["token", "user"]);
    }

    #[tokio::test]
    async fn test_path_ending_in_timestamp_is_counted_and_cleared() {
        let (fetcher, _, store) = setup(&[("/foo_timestamp", json!({"ok": true}))]).await;
        store.set("token", "jwt").unwrap();

        fetcher.fetch("/foo_timestamp").await.unwrap();

        let stats = fetcher.stats().unwrap();
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.fresh_entries, 1);

        let cleared = fetcher.clear().unwrap();
        assert_eq!(cleared.entries_removed, 1);
        assert_eq!(store.keys().unwrap(), vec!["token"]);
    }
}
