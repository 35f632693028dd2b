//! Series display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_match_time, or_dash, truncate_string};
use crate::models::series::{SeriesMatch, SeriesSummary};

/// Series display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SeriesDisplay {
    #[tabled(rename = "SERIES ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "DATES")]
    pub dates: String,

    /// Match counts per format
    #[tabled(rename = "FORMATS")]
    pub formats: String,
}

impl From<&SeriesSummary> for SeriesDisplay {
    fn from(series: &SeriesSummary) -> Self {
        let dates = match (series.start_date.as_str(), series.end_date.as_str()) {
            ("", "") => String::new(),
            (start, "") => format_match_time(start),
            ("", end) => format_match_time(end),
            (start, end) => format!("{} - {}", format_match_time(start), format_match_time(end)),
        };

        Self {
            id: series.id.clone(),
            name: truncate_string(&series.name, 48),
            dates: or_dash(&dates),
            formats: or_dash(&series.formats()),
        }
    }
}

/// Fixture row in a series detail.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SeriesMatchDisplay {
    #[tabled(rename = "MATCH ID")]
    pub id: String,

    #[tabled(rename = "MATCH")]
    pub name: String,

    #[tabled(rename = "DATE")]
    pub date: String,

    #[tabled(rename = "VENUE")]
    pub venue: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl From<&SeriesMatch> for SeriesMatchDisplay {
    fn from(m: &SeriesMatch) -> Self {
        Self {
            id: m.id.clone(),
            name: truncate_string(&m.name, 40),
            date: format_match_time(&m.date),
            venue: truncate_string(&m.venue, 32),
            status: truncate_string(&m.status, 40),
        }
    }
}
