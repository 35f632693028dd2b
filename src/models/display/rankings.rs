//! Ranking display model

use serde::Serialize;
use tabled::Tabled;

use super::common::or_dash;
use crate::models::rankings::RankingEntry;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RankingDisplay {
    #[tabled(rename = "RANK")]
    pub rank: i64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "COUNTRY")]
    pub country: String,

    #[tabled(rename = "RATING")]
    pub rating: String,
}

impl From<&RankingEntry> for RankingDisplay {
    fn from(entry: &RankingEntry) -> Self {
        Self {
            rank: entry.rank,
            name: entry.name.clone(),
            country: or_dash(&entry.country),
            rating: entry.rating_text(),
        }
    }
}
