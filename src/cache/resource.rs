//! Per-consumer view of a cached URL
//!
//! A [`Resource`] tracks one URL for one consumer and publishes its
//! `{data, loading, error}` state on a watch channel. It reads through the
//! shared [`CachedFetcher`], optionally re-fetches on a fixed interval, and
//! goes quiet once unmounted.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::fetcher::{CachedFetcher, FetchMode};
use crate::client::FetchApi;
use crate::error::Error;

/// Where a resource is in its load cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

impl FetchStatus {
    pub fn is_settled(self) -> bool {
        matches!(self, FetchStatus::Success | FetchStatus::Failed)
    }
}

/// State published to consumers
#[derive(Debug, Clone)]
pub struct FetchState {
    pub data: Option<Value>,
    pub loading: bool,
    pub error: Option<Arc<Error>>,
    pub status: FetchStatus,
}

impl Default for FetchState {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
            status: FetchStatus::Idle,
        }
    }
}

/// Per-resource fetch options
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
    /// Cache policy for the initial load and URL changes
    pub mode: FetchMode,
    /// Overrides the fetcher's TTL for this resource
    pub ttl: Option<Duration>,
    /// Re-fetch on this interval while mounted
    pub refresh_interval: Option<Duration>,
}

struct ResourceInner<C: FetchApi + 'static> {
    fetcher: Arc<CachedFetcher<C>>,
    options: FetchOptions,
    url: Mutex<Option<String>>,
    generation: AtomicU64,
    mounted: AtomicBool,
    state: watch::Sender<FetchState>,
}

impl<C: FetchApi + 'static> ResourceInner<C> {
    fn current_url(&self) -> Option<String> {
        self.url.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn is_current(&self, generation: u64) -> bool {
        self.mounted.load(Ordering::SeqCst) && self.generation.load(Ordering::SeqCst) == generation
    }

    /// Apply `update` unless the resource was unmounted or moved on
    fn publish(&self, generation: u64, update: impl FnOnce(&mut FetchState)) {
        if self.is_current(generation) {
            self.state.send_modify(update);
        }
    }

    async fn load(self: Arc<Self>, generation: u64, url: String, mode: FetchMode) {
        if !self.is_current(generation) {
            return;
        }

        if mode == FetchMode::CacheFirst
            && let Some(data) = self.fetcher.cached(&url, self.ttl())
        {
            self.publish(generation, |state| {
                state.data = Some(data);
                state.loading = false;
                state.error = None;
                state.status = FetchStatus::Success;
            });
            return;
        }

        self.publish(generation, |state| {
            state.loading = true;
            state.error = None;
            state.status = FetchStatus::Loading;
        });

        let result = self.fetcher.fetch_with(&url, mode, self.options.ttl).await;

        self.publish(generation, |state| {
            state.loading = false;
            match result {
                Ok(data) => {
                    state.data = Some(data);
                    state.error = None;
                    state.status = FetchStatus::Success;
                }
                Err(e) => {
                    log::debug!("Fetch of {} failed: {}", url, e);
                    state.error = Some(Arc::new(e));
                    state.status = FetchStatus::Failed;
                }
            }
        });
    }

    fn ttl(&self) -> Duration {
        self.options.ttl.unwrap_or_else(|| self.fetcher.ttl())
    }
}

/// One consumer's subscription to a URL.
///
/// Dropping the resource unmounts it. Requests already in flight are not
/// aborted; their results are stored in the cache but not published.
pub struct Resource<C: FetchApi + 'static> {
    shared: Arc<ResourceInner<C>>,
    poller: Mutex<Option<JoinHandle<()>>>,
}

impl<C: FetchApi + 'static> Resource<C> {
    /// Mount a resource for `url` and start loading it.
    ///
    /// An absent or empty URL performs no fetch and leaves the initial state.
    pub fn new(fetcher: Arc<CachedFetcher<C>>, url: Option<&str>, options: FetchOptions) -> Self {
        let (state, _) = watch::channel(FetchState::default());
        let url = url.filter(|u| !u.trim().is_empty()).map(str::to_string);

        let resource = Self {
            shared: Arc::new(ResourceInner {
                fetcher,
                options,
                url: Mutex::new(url.clone()),
                generation: AtomicU64::new(0),
                mounted: AtomicBool::new(true),
                state,
            }),
            poller: Mutex::new(None),
        };

        if let Some(url) = url {
            resource.spawn_load(0, url, options.mode);
        }
        if let Some(interval) = options.refresh_interval {
            resource.start_polling(interval);
        }

        resource
    }

    /// Watch state changes
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.shared.state.subscribe()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> FetchState {
        self.shared.state.borrow().clone()
    }

    pub fn url(&self) -> Option<String> {
        self.shared.current_url()
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.mounted.load(Ordering::SeqCst)
    }

    /// Wait until the current load settles, returning the settled state.
    ///
    /// Never returns for a resource that has no URL or was unmounted before
    /// its load finished.
    pub async fn settled(&self) -> FetchState {
        let mut rx = self.subscribe();
        match rx.wait_for(|state| state.status.is_settled()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    /// Point the resource at a new URL.
    ///
    /// Results still pending for the previous URL are discarded.
    pub fn set_url(&self, url: Option<&str>) {
        let url = url.filter(|u| !u.trim().is_empty()).map(str::to_string);
        *self.shared.url.lock().unwrap_or_else(|e| e.into_inner()) = url.clone();
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(url) = url {
            self.spawn_load(generation, url, self.shared.options.mode);
        }
    }

    /// Fetch again, bypassing any cached entry, and wait for the result
    pub async fn refetch(&self) -> FetchState {
        if let Some(url) = self.shared.current_url() {
            let generation = self.shared.generation.load(Ordering::SeqCst);
            self.shared
                .clone()
                .load(generation, url, refresh_mode(self.shared.options.mode))
                .await;
        }
        self.state()
    }

    /// Stop publishing state and stop polling
    pub fn unmount(&self) {
        self.shared.mounted.store(false, Ordering::SeqCst);
        if let Some(poller) = self
            .poller
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            poller.abort();
        }
    }

    fn spawn_load(&self, generation: u64, url: String, mode: FetchMode) {
        tokio::spawn(self.shared.clone().load(generation, url, mode));
    }

    fn start_polling(&self, every: Duration) {
        let shared = self.shared.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick completes immediately; the initial load covers it
            interval.tick().await;

            loop {
                interval.tick().await;
                if !shared.mounted.load(Ordering::SeqCst) {
                    break;
                }
                if let Some(url) = shared.current_url() {
                    log::debug!("Polling {}", url);
                    let generation = shared.generation.load(Ordering::SeqCst);
                    let mode = refresh_mode(shared.options.mode);
                    shared.clone().load(generation, url, mode).await;
                }
            }
        });

        *self.poller.lock().unwrap_or_else(|e| e.into_inner()) = Some(handle);
    }
}

impl<C: FetchApi + 'static> Drop for Resource<C> {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Polling and retries skip the cache read but keep `NoCache` uncached
fn refresh_mode(mode: FetchMode) -> FetchMode {
    match mode {
        FetchMode::NoCache => FetchMode::NoCache,
        _ => FetchMode::Refresh,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockCricketClient;
    use crate::error::ApiError;
    use crate::storage::{KeyValueStore, MemoryStore};
    use chrono::Utc;
    use serde_json::json;

    const TTL: Duration = Duration::from_secs(300);

    async fn fetcher_with(
        mock: MockCricketClient,
    ) -> (
        Arc<CachedFetcher<MockCricketClient>>,
        Arc<MockCricketClient>,
        Arc<MemoryStore>,
    ) {
        let mock = Arc::new(mock);
        let store = Arc::new(MemoryStore::new());
        let fetcher = Arc::new(CachedFetcher::new(mock.clone(), Some(store.clone()), TTL));
        (fetcher, mock, store)
    }

    #[tokio::test]
    async fn test_initial_state() {
        let state = FetchState::default();
        assert!(state.loading);
        assert!(state.data.is_none());
        assert!(state.error.is_none());
        assert_eq!(state.status, FetchStatus::Idle);
    }

    #[tokio::test]
    async fn test_loads_data() {
        let mock = MockCricketClient::new()
            .with_response("/api/v1/cricket/live", json!([{"id": 1}]))
            .await;
        let (fetcher, mock, _) = fetcher_with(mock).await;

        let resource = Resource::new(fetcher, Some("/api/v1/cricket/live"), FetchOptions::default());
        let state = resource.settled().await;

        assert_eq!(state.status, FetchStatus::Success);
        assert!(!state.loading);
        assert_eq!(state.data, Some(json!([{"id": 1}])));
        assert_eq!(mock.fetch_count("/api/v1/cricket/live").await, 1);
    }

    #[tokio::test]
    async fn test_fresh_cache_hit_skips_network() {
        let (fetcher, mock, store) = fetcher_with(MockCricketClient::new()).await;
        store.set("/x", r#"{"score":1}"#).unwrap();
        store
            .set(
                "/x_timestamp",
                &(Utc::now().timestamp_millis() - 60_000).to_string(),
            )
            .unwrap();

        let resource = Resource::new(fetcher, Some("/x"), FetchOptions::default());
        let state = resource.settled().await;

        assert_eq!(state.data, Some(json!({"score": 1})));
        assert!(!state.loading);
        assert_eq!(mock.total_fetches().await, 0);
    }

    #[tokio::test]
    async fn test_empty_url_does_nothing() {
        let (fetcher, mock, _) = fetcher_with(MockCricketClient::new()).await;

        let none = Resource::new(fetcher.clone(), None, FetchOptions::default());
        let empty = Resource::new(fetcher, Some(""), FetchOptions::default());
        tokio::time::sleep(Duration::from_millis(20)).await;

        for resource in [&none, &empty] {
            let state = resource.state();
            assert!(state.loading);
            assert!(state.data.is_none());
            assert_eq!(state.status, FetchStatus::Idle);
        }
        assert_eq!(mock.total_fetches().await, 0);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_data() {
        let mock = MockCricketClient::new().with_response("/x", json!(1)).await;
        let (fetcher, mock, _) = fetcher_with(mock).await;

        let resource = Resource::new(fetcher, Some("/x"), FetchOptions::default());
        resource.settled().await;

        mock.set_failure("/x", ApiError::ServerError("down".into()))
            .await;
        let state = resource.refetch().await;

        assert_eq!(state.status, FetchStatus::Failed);
        assert!(!state.loading);
        assert_eq!(state.data, Some(json!(1)));
        assert!(state.error.unwrap().to_string().contains("down"));
    }

    #[tokio::test]
    async fn test_refetch_bypasses_cache() {
        let mock = MockCricketClient::new().with_response("/x", json!(1)).await;
        let (fetcher, mock, _) = fetcher_with(mock).await;

        let resource = Resource::new(fetcher, Some("/x"), FetchOptions::default());
        resource.settled().await;
        mock.set_response("/x", json!(2)).await;

        let state = resource.refetch().await;

        assert_eq!(state.data, Some(json!(2)));
        assert!(state.error.is_none());
        assert_eq!(mock.fetch_count("/x").await, 2);
    }

    #[tokio::test]
    async fn test_unmount_during_fetch_publishes_nothing() {
        let mock = MockCricketClient::new()
            .with_response("/slow", json!({"done": true}))
            .await
            .with_delay(Duration::from_millis(50))
            .await;
        let (fetcher, mock, store) = fetcher_with(mock).await;

        let resource = Resource::new(fetcher, Some("/slow"), FetchOptions::default());
        let mut rx = resource.subscribe();
        rx.wait_for(|s| s.status == FetchStatus::Loading)
            .await
            .unwrap();

        resource.unmount();
        tokio::time::sleep(Duration::from_millis(120)).await;

        let state = resource.state();
        assert_eq!(state.status, FetchStatus::Loading);
        assert!(state.data.is_none());
        assert!(state.error.is_none());
        assert!(!resource.is_mounted());
        // The request itself still completed and was cached
        assert_eq!(mock.fetch_count("/slow").await, 1);
        assert!(store.get("/slow").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_set_url_discards_superseded_result() {
        let mock = MockCricketClient::new()
            .with_response("/old", json!("old"))
            .await
            .with_response("/new", json!("new"))
            .await
            .with_delay(Duration::from_millis(30))
            .await;
        let (fetcher, _, _) = fetcher_with(mock).await;

        let resource = Resource::new(fetcher, Some("/old"), FetchOptions::default());
        resource.set_url(Some("/new"));

        let state = resource.settled().await;
        assert_eq!(state.data, Some(json!("new")));
        assert_eq!(resource.url().as_deref(), Some("/new"));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(resource.state().data, Some(json!("new")));
    }

    #[tokio::test]
    async fn test_polling_refreshes_data() {
        let mock = MockCricketClient::new()
            .with_response("/api/v1/cricket/live", json!(1))
            .await;
        let (fetcher, mock, _) = fetcher_with(mock).await;

        let options = FetchOptions {
            refresh_interval: Some(Duration::from_millis(30)),
            ..FetchOptions::default()
        };
        let resource = Resource::new(fetcher, Some("/api/v1/cricket/live"), options);
        resource.settled().await;

        mock.set_response("/api/v1/cricket/live", json!(2)).await;
        let mut rx = resource.subscribe();
        rx.wait_for(|s| s.data == Some(json!(2))).await.unwrap();

        assert!(mock.fetch_count("/api/v1/cricket/live").await >= 2);

        resource.unmount();
        let count = mock.fetch_count("/api/v1/cricket/live").await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(mock.fetch_count("/api/v1/cricket/live").await, count);
    }
}
