//! Raw fetch API trait

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Untyped GET access to the backend.
///
/// `path` is the request URL relative to the configured base, including any
/// query string. The response body comes back as raw JSON.
#[async_trait]
pub trait FetchApi: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<Value>;
}
