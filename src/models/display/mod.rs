//! Display model implementations for table and JSON output
//!
//! Display models turn normalized cricket data into table rows with fixed
//! column names. They serialize with the same field names for JSON output.

mod center;
mod common;
mod matches;
mod news;
mod rankings;
mod series;
mod teams;

pub use center::{BatterDisplay, BowlerDisplay, CommentaryDisplay, SquadDisplay};
pub use common::{format_match_time, truncate_string};
pub use matches::MatchDisplay;
pub use news::NewsDisplay;
pub use rankings::RankingDisplay;
pub use series::{SeriesDisplay, SeriesMatchDisplay};
pub use teams::{FixtureDisplay, PlayerDisplay, TeamDisplay};
