//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use crate::error::Result;

/// Authentication operations for the CricSphere API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a bearer token
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse>;

    /// Create a new account
    async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse>;
}
