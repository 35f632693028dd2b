//! Read-through cache for API responses
//!
//! [`CachedFetcher`] owns the shared cache and single-flight map;
//! [`Resource`] is the per-consumer state machine on top of it.

pub mod fetcher;
pub mod key;
pub mod resource;

pub use fetcher::{CacheStats, CachedFetcher, ClearStats, FetchMode};
pub use resource::{FetchOptions, FetchState, FetchStatus, Resource};
