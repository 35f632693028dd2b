//! Profile API trait

use async_trait::async_trait;

use crate::client::models::{UserProfile, UserProfileUpdate};
use crate::error::Result;

/// Operations on the signed-in user's profile
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn get_profile(&self) -> Result<UserProfile>;

    async fn update_profile(&self, update: &UserProfileUpdate) -> Result<UserProfile>;
}
