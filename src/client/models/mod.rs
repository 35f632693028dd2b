//! CricSphere API data models
//!
//! Only the account-related payloads are typed. Cricket data (matches,
//! series, rankings, news) is passed through as raw JSON and read
//! defensively by [`crate::models`].

mod auth;
mod profile;

pub use auth::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, SessionUser};
pub use profile::{UserProfile, UserProfileUpdate};
