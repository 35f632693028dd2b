//! Cache key layout
//!
//! A cached response occupies two store keys: the literal request URL holding
//! the JSON body, and the same URL with a `_timestamp` suffix holding the
//! epoch-millisecond time it was stored. Query strings are part of the key,
//! so `?format=t20` and `?format=odi` cache separately.

use std::collections::HashSet;

/// Suffix appended to a URL to form its timestamp key
const TIMESTAMP_SUFFIX: &str = "_timestamp";

/// Store key holding the cached body for `url`
pub fn cache_key(url: &str) -> &str {
    url
}

/// Store key holding the cached-at time for `url`
pub fn timestamp_key(url: &str) -> String {
    format!("{}{}", url, TIMESTAMP_SUFFIX)
}

/// Whether a store key belongs to the response cache rather than the session.
///
/// Cached URLs always start with `/`; the session keys never do.
pub fn is_cache_key(key: &str) -> bool {
    key.starts_with('/')
}

/// Cached response bodies among `keys`.
///
/// A key ending in `_timestamp` is a body only when its own `_timestamp`
/// partner is stored too, so a fetched `/foo_timestamp` still counts. It
/// does share its store key with the timestamp of `/foo`; caching both
/// paths overwrites one entry with the other.
pub fn body_keys(keys: &[String]) -> Vec<&str> {
    let stored: HashSet<&str> = keys.iter().map(String::as_str).collect();
    keys.iter()
        .map(String::as_str)
        .filter(|key| is_cache_key(key))
        .filter(|key| {
            !key.ends_with(TIMESTAMP_SUFFIX) || stored.contains(timestamp_key(key).as_str())
        })
        .collect()
}
