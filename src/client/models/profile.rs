//! User profile models

use serde::{Deserialize, Serialize};

use super::SessionUser;

/// Profile returned by `GET /api/v1/user/profile`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub role: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_team: Option<String>,
}

/// Editable subset of the profile, sent with `PUT /api/v1/user/profile`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileUpdate {
    pub favorite_team: Option<String>,
}

impl UserProfile {
    /// Merge the profile into an existing session user, keeping its id
    pub fn apply_to(&self, user: &SessionUser) -> SessionUser {
        SessionUser {
            id: user.id,
            username: if self.username.is_empty() {
                user.username.clone()
            } else {
                self.username.clone()
            },
            email: if self.email.is_empty() {
                user.email.clone()
            } else {
                self.email.clone()
            },
            role: if self.role.is_empty() {
                user.role.clone()
            } else {
                self.role.clone()
            },
            favorite_team: self.favorite_team.clone(),
        }
    }
}
