//! Series listings and series detail

use serde::Serialize;
use serde_json::Value;

use super::extract::{
    as_list, envelope, first_array, matches_query, number_or, text, text_or, unwrap_data,
};
use super::matches::MatchSummary;

/// A series as shown in the schedule list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub id: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub odi: i64,
    pub t20: i64,
    pub test: i64,
    pub matches: i64,
}

impl SeriesSummary {
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: text_or(value, &["id", "seriesId"], ""),
            name: text_or(value, &["name", "seriesName"], "Unnamed series"),
            start_date: text_or(value, &["startDate", "startDt"], ""),
            end_date: text_or(value, &["endDate", "endDt"], ""),
            odi: number_or(value, &["odi"], 0.0) as i64,
            t20: number_or(value, &["t20"], 0.0) as i64,
            test: number_or(value, &["test"], 0.0) as i64,
            matches: number_or(value, &["matches"], 0.0) as i64,
        }
    }

    /// `2 Test, 3 ODI` style breakdown; empty when no counts are known
    pub fn formats(&self) -> String {
        [("Test", self.test), ("ODI", self.odi), ("T20", self.t20)]
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(label, count)| format!("{} {}", count, label))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Every series in a list payload, optionally filtered by name.
///
/// Accepts flat lists and the grouped `seriesMapProto -> series` layout.
pub fn series_list(body: &Value, query: Option<&str>) -> Vec<SeriesSummary> {
    let body = envelope(body);

    let groups = first_array(&body, &["seriesMapProto"]);
    let raw: Vec<Value> = if groups.is_empty() {
        as_list(&body, &["series", "seriesList", "list"])
    } else {
        groups
            .iter()
            .flat_map(|g| first_array(g, &["series"]))
            .collect()
    };

    raw.iter()
        .filter(|s| s.is_object())
        .map(SeriesSummary::from_value)
        .filter(|s| matches_query(&[&s.name], query))
        .collect()
}

/// A fixture inside a series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesMatch {
    pub id: String,
    pub name: String,
    pub status: String,
    pub venue: String,
    pub date: String,
}

/// Series header plus its fixtures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesDetail {
    pub info: SeriesSummary,
    pub matches: Vec<SeriesMatch>,
}

/// Read a series detail payload
pub fn series_detail(body: &Value) -> SeriesDetail {
    let body = unwrap_data(body);

    let mut matches: Vec<SeriesMatch> = first_array(&body, &["matchList"])
        .iter()
        .map(|m| SeriesMatch {
            id: text_or(m, &["id", "matchId"], ""),
            name: text_or(m, &["name", "matchDesc"], "Match"),
            status: text_or(m, &["status"], "Scheduled"),
            venue: text_or(m, &["venue"], "Venue TBD"),
            date: text_or(m, &["date", "dateTimeGMT"], "Date TBD"),
        })
        .collect();

    // Provider layout groups fixtures by day
    if matches.is_empty() {
        matches = first_array(&body, &["matchDetails"])
            .iter()
            .flat_map(|day| first_array(day, &["matchDetailsMap.match"]))
            .map(|m| {
                let summary = MatchSummary::from_value(&m);
                let name = match summary.description.as_str() {
                    "" => summary.title.clone(),
                    desc => format!("{}, {}", summary.title, desc),
                };
                SeriesMatch {
                    id: summary.id,
                    name,
                    status: summary.status,
                    venue: summary.venue,
                    date: summary.start,
                }
            })
            .collect();
    }

    let mut info = SeriesSummary::from_value(&body);
    if info.name == "Unnamed series"
        && let Some(name) = text(
            &body,
            &["matchDetails.0.matchDetailsMap.match.0.matchInfo.seriesName"],
        )
    {
        info.name = name;
    }

    SeriesDetail { info, matches }
}
