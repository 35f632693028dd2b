//! ICC ranking tables

use serde::Serialize;
use serde_json::Value;

use super::extract::{envelope, first_array, matches_query, number, text, text_or};

/// One row of a ranking table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub rank: i64,
    pub name: String,
    pub country: String,
    /// Rating or points; `None` when the provider sent neither
    pub rating: Option<f64>,
}

impl RankingEntry {
    /// `index` is the zero-based position, used when no rank is present
    pub fn from_value(value: &Value, index: usize) -> Self {
        Self {
            rank: number(value, &["rank"])
                .map(|r| r as i64)
                .filter(|r| *r > 0)
                .unwrap_or(index as i64 + 1),
            name: text_or(value, &["name", "teamName", "team", "country"], "Unknown"),
            country: text_or(value, &["country"], ""),
            rating: number(value, &["rating", "points"]),
        }
    }

    pub fn rating_text(&self) -> String {
        match self.rating {
            Some(r) if r.fract() == 0.0 => format!("{}", r as i64),
            Some(r) => format!("{:.1}", r),
            None => "-".to_string(),
        }
    }
}

/// Ranking rows, filtered by name or country.
///
/// Accepts a bare list or one nested under `rank`, `rankings`, `list` or `data`.
pub fn rankings(body: &Value, query: Option<&str>) -> Vec<RankingEntry> {
    let body = envelope(body);
    let raw = match &body {
        Value::Array(items) => items.clone(),
        other => first_array(other, &["rank", "rankings", "list", "data"]),
    };

    raw.iter()
        .enumerate()
        .filter(|(_, v)| v.is_object())
        .map(|(i, v)| RankingEntry::from_value(v, i))
        .filter(|e| matches_query(&[&e.name, &e.country], query))
        .collect()
}

/// Provider message shown when a ranking table is unavailable
pub fn unavailable_reason(body: &Value) -> Option<String> {
    text(&envelope(body), &["message", "error"])
}
