//! Command execution context
//!
//! Builds the shared stack every networked command needs: configuration,
//! the on-disk store, the session, the HTTP client and the cached fetcher.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use crate::cache::{CachedFetcher, FetchMode};
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::CricsphereClient;
use crate::config::Config;
use crate::error::Result;
use crate::session::Session;
use crate::storage::{KeyValueStore, SqliteStore};

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
    /// Resolved storage directory
    pub data_dir: PathBuf,
    pub store: Arc<dyn KeyValueStore>,
    pub session: Arc<Session>,
    pub client: Arc<CricsphereClient>,
    /// Read-through cache over `client`; uncached when caching is off
    pub fetcher: Arc<CachedFetcher<CricsphereClient>>,
}

impl CommandContext {
    /// Create a command context.
    ///
    /// # Errors
    /// Returns error if the config is invalid or the store cannot be opened.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;
        config.validate()?;
        let format = opts.resolve_format(&config);

        let data_dir = SqliteStore::resolve_dir(opts.data_dir_ref())?;
        let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open_at(&data_dir)?);
        let session = Arc::new(Session::new(store.clone()));

        let api_url = config.resolve_api_url(opts.api_url_ref());
        log::debug!("Using backend {}", api_url);
        let client = Arc::new(CricsphereClient::new(
            &api_url,
            session.clone(),
            config.request_timeout(),
        )?);

        let caching = config.cache.enabled && !opts.no_cache;
        if !caching {
            log::debug!("Response cache disabled");
        }
        let fetcher = Arc::new(CachedFetcher::new(
            client.clone(),
            caching.then(|| store.clone()),
            config.cache_ttl(),
        ));

        Ok(Self {
            config,
            format,
            data_dir,
            store,
            session,
            client,
            fetcher,
        })
    }

    /// Cache policy for ordinary reads
    pub fn fetch_mode(&self) -> FetchMode {
        if self.fetcher.is_enabled() {
            FetchMode::CacheFirst
        } else {
            FetchMode::NoCache
        }
    }

    /// GET `url` through the cache
    pub async fn get(&self, url: &str) -> Result<Value> {
        self.fetcher.fetch_with(url, self.fetch_mode(), None).await
    }

    /// Fetcher bound to the store even when `--no-cache` is set, for cache management
    pub fn cache_admin(&self) -> CachedFetcher<CricsphereClient> {
        CachedFetcher::new(
            self.client.clone(),
            Some(self.store.clone()),
            self.config.cache_ttl(),
        )
    }
}
