//! Match list display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{or_dash, truncate_string};
use crate::models::matches::MatchSummary;

/// Match display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MatchDisplay {
    #[tabled(rename = "MATCH ID")]
    pub id: String,

    #[tabled(rename = "MATCH")]
    pub title: String,

    #[tabled(rename = "FORMAT")]
    pub format: String,

    /// Innings scores, oldest first
    #[tabled(rename = "SCORE")]
    pub score: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl From<&MatchSummary> for MatchDisplay {
    fn from(m: &MatchSummary) -> Self {
        let score = m
            .innings
            .iter()
            .map(|i| i.score_line())
            .collect::<Vec<_>>()
            .join(" | ");

        Self {
            id: m.id.clone(),
            title: truncate_string(&m.title, 40),
            format: or_dash(&m.format),
            score: or_dash(&score),
            status: truncate_string(&m.status, 48),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match_display_from_summary() {
        let summary = MatchSummary::from_value(&json!({
            "id": "m1", "name": "India vs Australia", "matchType": "t20",
            "status": "India won by 5 wkts",
            "teams": ["India", "Australia"],
            "score": [
                {"inning": "Australia Inning 1", "r": 180, "w": 6, "o": 20},
                {"inning": "India Inning 1", "r": 181, "w": 5, "o": 19.2}
            ]
        }));

        let display = MatchDisplay::from(&summary);
        assert_eq!(display.id, "m1");
        assert_eq!(display.score, "180/6 (20) | 181/5 (19.2)");
        assert_eq!(display.status, "India won by 5 wkts");
    }

    #[test]
    fn test_match_display_without_score() {
        let summary = MatchSummary::from_value(&json!({"id": "m2", "status": "Starts at 10:00"}));
        let display = MatchDisplay::from(&summary);
        assert_eq!(display.score, "--");
    }
}
