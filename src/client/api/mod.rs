//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - login and registration
//! - [`FetchApi`] - raw GET of any backend path, the unit the cache works on
//! - [`ProfileApi`] - the signed-in user's profile

mod auth;
mod fetch;
mod profile;

pub use auth::AuthApi;
pub use fetch::FetchApi;
pub use profile::ProfileApi;
