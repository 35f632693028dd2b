//! Match summaries and live match state
//!
//! Two payload shapes reach the client. List endpoints forwarded from the
//! current-matches feed carry `teams: [..]` and `score: [{inning, r, w, o}]`;
//! the match center feeds carry `matchInfo` and `matchScore` with
//! `team1Score.inngs1 {runs, wickets, overs}`. Both read into [`MatchSummary`].

use serde::Serialize;
use serde_json::Value;

use super::extract::{as_list, envelope, first_array, number, path, text, text_or};

const DONE_MARKERS: [&str; 7] = [
    "won",
    "draw",
    "tie",
    "abandon",
    "no result",
    "result",
    "complete",
];

/// Whether a status line describes a finished match
pub fn is_match_done(status: &str) -> bool {
    let status = status.to_lowercase();
    DONE_MARKERS.iter().any(|marker| status.contains(marker))
}

/// Whether a status line describes the break between innings
pub fn is_innings_break(status: &str) -> bool {
    status.to_lowercase().contains("innings break")
}

/// Convert cricket overs notation (`12.3` = 12 overs 3 balls) to decimal overs
pub fn overs_to_decimal(overs: f64) -> f64 {
    if !overs.is_finite() || overs <= 0.0 {
        return 0.0;
    }
    let whole = overs.trunc();
    let balls = ((overs - whole) * 10.0).round();
    whole + balls / 6.0
}

/// Overs available per innings for limited-overs formats
pub fn overs_limit(format: &str) -> Option<f64> {
    let format = format.to_lowercase();
    if format.contains("t20") {
        Some(20.0)
    } else if format.contains("odi") {
        Some(50.0)
    } else {
        None
    }
}

/// One batting innings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Innings {
    /// Provider label, usually "<team> Inning 1"
    pub label: String,
    pub runs: i64,
    pub wickets: i64,
    /// Overs in cricket notation
    pub overs: f64,
}

impl Innings {
    fn from_value(value: &Value, label: String) -> Option<Self> {
        let runs = number(value, &["runs", "r"])?;
        Some(Self {
            label,
            runs: runs as i64,
            wickets: number(value, &["wickets", "w"]).unwrap_or(0.0) as i64,
            overs: number(value, &["overs", "o"]).unwrap_or(0.0),
        })
    }

    pub fn belongs_to(&self, team: &str) -> bool {
        !team.is_empty() && self.label.to_lowercase().contains(&team.to_lowercase())
    }

    /// `187/4 (19.4)`
    pub fn score_line(&self) -> String {
        format!("{}/{} ({})", self.runs, self.wickets, self.overs)
    }
}

/// State of play derived from the innings so far
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum MatchPhase {
    /// Side batting first; current run rate when overs have been bowled
    FirstInnings { run_rate: Option<f64> },
    /// Between innings
    InningsBreak { target: i64 },
    /// Second innings of a limited-overs match
    Chase {
        target: i64,
        runs_left: i64,
        overs_left: f64,
        required_rate: Option<f64>,
    },
}

/// Normalized view of a single match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub id: String,
    pub title: String,
    pub team1: String,
    pub team2: String,
    pub status: String,
    pub venue: String,
    pub format: String,
    pub description: String,
    pub start: String,
    pub innings: Vec<Innings>,
    #[serde(skip)]
    declared_winner: Option<String>,
}

impl MatchSummary {
    /// Read a match from either payload shape
    pub fn from_value(value: &Value) -> Self {
        let value = match value.get("matchDetails") {
            Some(inner) if inner.is_object() => inner,
            _ => value,
        };

        if value.get("matchInfo").is_some_and(Value::is_object) {
            Self::from_match_center(value)
        } else {
            Self::from_feed(value)
        }
    }

    fn from_feed(value: &Value) -> Self {
        let teams = first_array(value, &["teams"]);
        let team_name = |i: usize| {
            teams
                .get(i)
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| {
                    let name = text(value, &["name"])?;
                    name.split(" vs ").nth(i).map(|s| s.trim().to_string())
                })
        };
        let team1 = team_name(0).unwrap_or_else(|| "Team 1".to_string());
        let team2 = team_name(1).unwrap_or_else(|| "Team 2".to_string());

        let innings = first_array(value, &["score"])
            .iter()
            .filter_map(|inn| Innings::from_value(inn, text_or(inn, &["inning"], "")))
            .collect();

        Self {
            id: text_or(value, &["id", "matchId"], ""),
            title: text(value, &["name"]).unwrap_or_else(|| format!("{} vs {}", team1, team2)),
            status: text_or(value, &["status"], "Status unavailable"),
            venue: text_or(value, &["venue"], "Venue TBD"),
            format: text_or(value, &["matchType", "matchFormat"], "Match"),
            description: text_or(value, &["matchDesc", "seriesName"], ""),
            start: text_or(value, &["dateTimeGMT", "date", "startDate"], ""),
            declared_winner: text(value, &["matchWinner"]),
            team1,
            team2,
            innings,
        }
    }

    fn from_match_center(value: &Value) -> Self {
        let info = path(value, "matchInfo").unwrap_or(value);
        let team1 = text_or(info, &["team1.teamName", "team1.name"], "Team 1");
        let team2 = text_or(info, &["team2.teamName", "team2.name"], "Team 2");

        let mut innings = Vec::new();
        for n in 1..=2 {
            for (side, team) in [("team1Score", &team1), ("team2Score", &team2)] {
                let key = format!("matchScore.{}.inngs{}", side, n);
                if let Some(inn) = path(value, &key) {
                    let label = format!("{} Inning {}", team, n);
                    innings.extend(Innings::from_value(inn, label));
                }
            }
        }

        Self {
            id: text_or(info, &["matchId", "id"], ""),
            title: format!("{} vs {}", team1, team2),
            status: text_or(info, &["status", "state"], "Match in progress"),
            venue: text_or(
                info,
                &["venueInfo.shortName", "venueInfo.ground", "venueInfo.city"],
                "Venue N/A",
            ),
            format: text_or(info, &["matchFormat", "matchType"], "Intl"),
            description: text_or(info, &["matchDesc", "seriesName"], ""),
            start: text_or(info, &["startDate", "startDt"], ""),
            declared_winner: None,
            team1,
            team2,
            innings,
        }
    }

    pub fn is_done(&self) -> bool {
        is_match_done(&self.status)
    }

    pub fn is_break(&self) -> bool {
        is_innings_break(&self.status)
    }

    /// The innings currently in progress (the most recent one)
    pub fn live_innings(&self) -> Option<&Innings> {
        self.innings.last()
    }

    /// Team batting in the live innings
    pub fn batting_team(&self) -> Option<&str> {
        if self.is_done() {
            return None;
        }
        let live = self.live_innings()?;
        [&self.team1, &self.team2]
            .into_iter()
            .find(|team| live.belongs_to(team))
            .map(String::as_str)
    }

    /// Winner of a finished match.
    ///
    /// Uses the declared winner, then a "won" status naming a side, then the
    /// higher total of the last two innings.
    pub fn winner(&self) -> Option<&str> {
        if !self.is_done() {
            return None;
        }
        if let Some(declared) = &self.declared_winner {
            return Some(declared.as_str());
        }

        let status = self.status.to_lowercase();
        if status.contains("won") {
            for team in [&self.team1, &self.team2] {
                if status.contains(&team.to_lowercase()) {
                    return Some(team.as_str());
                }
            }
        }

        let [first, second] = self.innings.get(self.innings.len().checked_sub(2)?..)? else {
            return None;
        };
        let (team1_runs, team2_runs) = if first.belongs_to(&self.team1) {
            (first.runs, second.runs)
        } else {
            (second.runs, first.runs)
        };

        match team1_runs.cmp(&team2_runs) {
            std::cmp::Ordering::Greater => Some(self.team1.as_str()),
            std::cmp::Ordering::Less => Some(self.team2.as_str()),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Target, rates and remaining resources for the current phase
    pub fn phase(&self) -> Option<MatchPhase> {
        let first = self.innings.first()?;
        let current = self.live_innings()?;

        if self.is_break() {
            return Some(MatchPhase::InningsBreak {
                target: first.runs + 1,
            });
        }

        if self.innings.len() == 1 {
            let overs = overs_to_decimal(first.overs);
            let run_rate = (overs > 0.0).then(|| round2(first.runs as f64 / overs));
            return Some(MatchPhase::FirstInnings { run_rate });
        }

        let limit = overs_limit(&self.format)?;
        let target = first.runs + 1;
        let runs_left = target - current.runs;
        let overs_left = limit - overs_to_decimal(current.overs);
        let required_rate =
            (overs_left > 0.0 && runs_left > 0).then(|| round2(runs_left as f64 / overs_left));

        Some(MatchPhase::Chase {
            target,
            runs_left,
            overs_left: round2(overs_left),
            required_rate,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Every match in a list payload.
///
/// Understands the grouped `typeMatches -> seriesMatches -> seriesAdWrapper
/// -> matches` layout as well as flat lists.
pub fn match_list(body: &Value) -> Vec<MatchSummary> {
    let body = envelope(body);

    let groups = first_array(&body, &["typeMatches"]);
    if !groups.is_empty() {
        return groups
            .iter()
            .flat_map(|group| first_array(group, &["seriesMatches"]))
            .flat_map(|series| first_array(&series, &["seriesAdWrapper.matches", "matches"]))
            .map(|m| MatchSummary::from_value(&m))
            .collect();
    }

    as_list(&body, &["matches", "matchList", "list"])
        .iter()
        .filter(|m| m.is_object())
        .map(MatchSummary::from_value)
        .collect()
}

/// Split matches into ongoing and finished, newest first
pub fn partition_live(mut matches: Vec<MatchSummary>) -> (Vec<MatchSummary>, Vec<MatchSummary>) {
    matches.sort_by(|a, b| b.start.cmp(&a.start));
    matches.into_iter().partition(|m| !m.is_done())
}
