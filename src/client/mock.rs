//! Mock CricSphere API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::api::{AuthApi, FetchApi, ProfileApi};
use super::models::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, SessionUser, UserProfile,
    UserProfileUpdate,
};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure responses per path, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockCricketClient::new()
///     .with_response("/api/v1/cricket/live", json!([]))
///     .await;
///
/// let body = mock.fetch("/api/v1/cricket/live").await?;
/// assert_eq!(mock.fetch_count("/api/v1/cricket/live").await, 1);
/// ```
#[derive(Default)]
pub struct MockCricketClient {
    /// Bodies returned from fetch, by path
    responses: Arc<Mutex<HashMap<String, Value>>>,
    /// Errors returned from fetch, by path; persistent until cleared
    failures: Arc<Mutex<HashMap<String, ApiError>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Artificial latency applied to every fetch
    delay: Arc<Mutex<Option<Duration>>>,
    /// Fetch calls per path
    fetches: Arc<Mutex<HashMap<String, usize>>>,
    /// Profile returned from get_profile and update_profile
    profile: Arc<Mutex<Option<UserProfile>>>,
    /// Track number of non-fetch calls
    call_count: Arc<Mutex<CallCounts>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub login: usize,
    pub register: usize,
    pub get_profile: usize,
    pub update_profile: usize,
}

impl MockCricketClient {
    /// Create a new mock client with no configured responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the body returned for `path`.
    pub async fn with_response(self, path: &str, body: Value) -> Self {
        self.set_response(path, body).await;
        self
    }

    /// Change the body returned for `path` after construction.
    pub async fn set_response(&self, path: &str, body: Value) {
        self.failures.lock().await.remove(path);
        self.responses.lock().await.insert(path.to_string(), body);
    }

    /// Make every fetch of `path` fail with `error`.
    pub async fn set_failure(&self, path: &str, error: ApiError) {
        self.failures.lock().await.insert(path.to_string(), error);
    }

    /// Configure a one-shot error for the next call of any kind.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Delay every fetch by `delay`.
    pub async fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock().await = Some(delay);
        self
    }

    /// Configure the profile returned from the profile endpoints.
    pub async fn with_profile(self, profile: UserProfile) -> Self {
        *self.profile.lock().await = Some(profile);
        self
    }

    /// Number of fetches issued for `path`.
    pub async fn fetch_count(&self, path: &str) -> usize {
        self.fetches.lock().await.get(path).copied().unwrap_or(0)
    }

    /// Total fetches across all paths.
    pub async fn total_fetches(&self) -> usize {
        self.fetches.lock().await.values().sum()
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }
}

// ============================================================================
// FetchApi Implementation
// ============================================================================

#[async_trait]
impl FetchApi for MockCricketClient {
    async fn fetch(&self, path: &str) -> Result<Value> {
        *self
            .fetches
            .lock()
            .await
            .entry(path.to_string())
            .or_insert(0) += 1;

        let delay = *self.delay.lock().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.check_error().await?;

        if let Some(failure) = self.failures.lock().await.get(path) {
            return Err(failure.clone().into());
        }

        self.responses
            .lock()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("No mock response for {}", path)).into())
    }
}

// ============================================================================
// AuthApi Implementation
// ============================================================================

#[async_trait]
impl AuthApi for MockCricketClient {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse> {
        self.check_error().await?;
        self.call_count.lock().await.login += 1;

        Ok(LoginResponse {
            token: "mock-jwt-token".to_string(),
            user: SessionUser {
                id: Some(1),
                username: credentials.username.clone(),
                email: format!("{}@example.com", credentials.username),
                role: "USER".to_string(),
                favorite_team: None,
            },
        })
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<MessageResponse> {
        self.check_error().await?;
        self.call_count.lock().await.register += 1;

        Ok(MessageResponse {
            message: "User registered successfully".to_string(),
        })
    }
}

// ============================================================================
// ProfileApi Implementation
// ============================================================================

#[async_trait]
impl ProfileApi for MockCricketClient {
    async fn get_profile(&self) -> Result<UserProfile> {
        self.check_error().await?;
        self.call_count.lock().await.get_profile += 1;

        self.profile
            .lock()
            .await
            .clone()
            .ok_or_else(|| ApiError::NotFound("No mock profile".to_string()).into())
    }

    async fn update_profile(&self, update: &UserProfileUpdate) -> Result<UserProfile> {
        self.check_error().await?;
        self.call_count.lock().await.update_profile += 1;

        let mut profile = self.profile.lock().await;
        let current = profile
            .as_mut()
            .ok_or_else(|| ApiError::NotFound("No mock profile".to_string()))?;
        current.favorite_team = update.favorite_team.clone();
        Ok(current.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_returns_configured_body() {
        let mock = MockCricketClient::new()
            .with_response("/api/v1/cricket/live", json!([{"id": 1}]))
            .await;

        let body = mock.fetch("/api/v1/cricket/live").await.unwrap();
        assert_eq!(body, json!([{"id": 1}]));
        assert_eq!(mock.fetch_count("/api/v1/cricket/live").await, 1);
    }

    #[tokio::test]
    async fn test_mock_unknown_path_is_not_found() {
        let mock = MockCricketClient::new();
        let err = mock.fetch("/missing").await.unwrap_err();
        assert!(matches!(err, crate::error::Error::Api(ApiError::NotFound(_))));
        assert_eq!(mock.fetch_count("/missing").await, 1);
    }

    #[tokio::test]
    async fn test_mock_one_shot_error() {
        let mock = MockCricketClient::new()
            .with_response("/x", json!(1))
            .await
            .with_error(ApiError::Unauthorized)
            .await;

        assert!(mock.fetch("/x").await.unwrap_err().is_unauthorized());
        assert_eq!(mock.fetch("/x").await.unwrap(), json!(1));
    }

    #[tokio::test]
    async fn test_mock_update_profile() {
        let mock = MockCricketClient::new()
            .with_profile(UserProfile {
                username: "rohit".to_string(),
                email: "rohit@example.com".to_string(),
                role: "USER".to_string(),
                favorite_team: None,
            })
            .await;

        let updated = mock
            .update_profile(&UserProfileUpdate {
                favorite_team: Some("India".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(updated.favorite_team.as_deref(), Some("India"));
        assert_eq!(mock.call_counts().await.update_profile, 1);
    }
}
