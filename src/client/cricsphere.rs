//! CricSphere API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::api::{AuthApi, FetchApi, ProfileApi};
use super::endpoints;
use super::models::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, UserProfile, UserProfileUpdate,
};
use crate::error::{ApiError, Result};
use crate::session::Session;

/// HTTP client for the CricSphere backend.
///
/// Attaches the session's bearer token to every request and reacts to a 401
/// from any endpoint by expiring the session before the error is returned.
/// There is no retry or token refresh: a 401 ends the session.
pub struct CricsphereClient {
    http: HttpClient,
    base_url: String,
    session: Arc<Session>,
}

impl CricsphereClient {
    /// Create a client for `base_url` bound to `session`
    pub fn new(base_url: &str, session: Arc<Session>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = HttpClient::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Issue a request and return the raw JSON body
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = self.url(path);
        let mut request = self.http.request(method.clone(), &url);

        if let Some(token) = self.session.token() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        log::debug!("{} {}", method, url);
        let response = request.send().await.map_err(ApiError::from)?;

        let status = response.status();
        match status {
            status if status.is_success() => {
                let text = response.text().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to read response: {}", e))
                })?;
                Ok(parse_body(&text))
            }
            StatusCode::UNAUTHORIZED => {
                self.session.expire();
                Err(ApiError::Unauthorized.into())
            }
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => {
                let text = response.text().await.unwrap_or_default();
                Err(ApiError::NotFound(error_message(&text, path)).into())
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let text = response.text().await.unwrap_or_default();
                Err(ApiError::BadRequest(error_message(&text, "Bad request")).into())
            }
            status if status.is_server_error() => {
                let text = response.text().await.unwrap_or_default();
                Err(ApiError::ServerError(error_message(&text, status.as_str())).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }

    async fn send_typed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T> {
        let value = self.send(method, path, body).await?;
        serde_json::from_value(value).map_err(|e| {
            ApiError::InvalidResponse(format!("Unexpected response from {}: {}", path, e)).into()
        })
    }
}

/// Successful bodies are JSON; empty becomes null, anything else a JSON string.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Pull the backend's `message` out of an error body, or fall back
fn error_message(text: &str, fallback: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => map
            .get("message")
            .or_else(|| map.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string()),
        _ if !text.trim().is_empty() => text.trim().to_string(),
        _ => fallback.to_string(),
    }
}

#[async_trait]
impl FetchApi for CricsphereClient {
    async fn fetch(&self, path: &str) -> Result<Value> {
        self.send(Method::GET, path, None).await
    }
}

#[async_trait]
impl AuthApi for CricsphereClient {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse> {
        let body = serde_json::to_value(credentials)?;
        self.send_typed(Method::POST, endpoints::LOGIN, Some(body))
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse> {
        let body = serde_json::to_value(request)?;
        let value = self.send(Method::POST, endpoints::REGISTER, Some(body)).await?;

        // Older backends answer with a bare string
        Ok(match value {
            Value::String(message) => MessageResponse { message },
            other => serde_json::from_value(other).unwrap_or(MessageResponse {
                message: "User registered successfully".to_string(),
            }),
        })
    }
}

#[async_trait]
impl ProfileApi for CricsphereClient {
    async fn get_profile(&self) -> Result<UserProfile> {
        self.send_typed(Method::GET, endpoints::PROFILE, None).await
    }

    async fn update_profile(&self, update: &UserProfileUpdate) -> Result<UserProfile> {
        let body = serde_json::to_value(update)?;
        self.send_typed(Method::PUT, endpoints::PROFILE, Some(body))
            .await
    }
}
