//! Authentication models

use serde::{Deserialize, Serialize};

/// Credentials posted to `/api/v1/auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Payload posted to `/api/v1/auth/register`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_team: Option<String>,
}

/// Successful login: the bearer token and the account it belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

/// The signed-in account as kept in the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub username: String,

    #[serde(default)]
    pub email: String,

    #[serde(default = "default_role")]
    pub role: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_team: Option<String>,
}

fn default_role() -> String {
    "USER".to_string()
}

/// `{"message": "..."}` bodies returned by register and by error responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
