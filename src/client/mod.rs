//! CricSphere API client

pub mod api;
pub mod cricsphere;
pub mod endpoints;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use api::{AuthApi, FetchApi, ProfileApi};
pub use cricsphere::CricsphereClient;
#[cfg(test)]
pub use mock::MockCricketClient;

