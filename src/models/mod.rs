//! Cricket domain models
//!
//! Readers that normalize backend payloads into typed values, plus the
//! display models used for CLI output.

pub mod center;
pub mod display;
pub mod extract;
pub mod matches;
pub mod news;
pub mod rankings;
pub mod series;
pub mod teams;
