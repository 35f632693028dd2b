//! Team directory and team rosters

use serde::Serialize;
use serde_json::Value;

use super::center::PlayerRole;
use super::extract::{
    as_list, envelope, first_array, flag, matches_query, text, text_or, unwrap_data,
};

/// Categories returned by the combined team listing, in display order
pub const CATEGORIES: [&str; 4] = ["international", "league", "domestic", "women"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub code: String,
}

impl Team {
    pub fn from_value(value: &Value) -> Option<Self> {
        let id = text(value, &["teamId", "id", "teamID"])?;
        Some(Self {
            id,
            name: text_or(value, &["teamName", "name"], "Unknown Team"),
            code: text_or(value, &["teamSName", "shortName", "code"], ""),
        })
    }
}

/// Teams under one category heading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamGroup {
    pub category: String,
    pub teams: Vec<Team>,
}

fn read_teams(value: &Value) -> Vec<Team> {
    as_list(value, &["list", "teams"])
        .iter()
        .filter_map(Team::from_value)
        .collect()
}

/// Team groups from a listing payload, filtered by name or code.
///
/// The combined listing keys each category; a single-category listing is
/// returned as one group named `fallback`. Entries without an id are
/// provider section headers and are skipped. Empty groups are dropped.
pub fn team_groups(body: &Value, fallback: &str, query: Option<&str>) -> Vec<TeamGroup> {
    let body = envelope(body);

    let keyed: Vec<TeamGroup> = CATEGORIES
        .iter()
        .filter_map(|category| {
            body.get(*category).map(|value| TeamGroup {
                category: category.to_string(),
                teams: read_teams(value),
            })
        })
        .collect();

    let groups = if keyed.is_empty() {
        vec![TeamGroup {
            category: fallback.to_string(),
            teams: read_teams(&body),
        }]
    } else {
        keyed
    };

    groups
        .into_iter()
        .map(|mut group| {
            group
                .teams
                .retain(|t| matches_query(&[&t.name, &t.code], query));
            group
        })
        .filter(|group| !group.teams.is_empty())
        .collect()
}

/// Player on a team roster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamPlayer {
    pub id: String,
    pub name: String,
    pub role: String,
    pub kind: PlayerRole,
    pub international: bool,
}

impl TeamPlayer {
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: text_or(value, &["id", "playerId"], ""),
            name: text_or(value, &["name", "fullName"], "Unknown Player"),
            role: text_or(value, &["role", "playingRole", "category"], "Player"),
            kind: PlayerRole::from_player(value),
            international: flag(value, &["isInternational", "intl", "international"]),
        }
    }
}

/// Roster for a team.
///
/// Rosters nest players under `player`, `players` or `list`; header rows
/// without a name are dropped.
pub fn team_players(body: &Value, role: Option<PlayerRole>) -> Vec<TeamPlayer> {
    let body = envelope(body);
    as_list(&body, &["player", "players", "list"])
        .iter()
        .filter(|p| text(p, &["name", "fullName"]).is_some())
        .map(TeamPlayer::from_value)
        .filter(|p| role.is_none_or(|r| p.kind == r))
        .collect()
}

/// Team header built from the stats endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamProfile {
    pub id: String,
    pub name: String,
    pub code: String,
    pub location: String,
    pub captain: String,
    pub coach: String,
    pub overview: Option<String>,
    pub t20_rank: Option<String>,
    pub trophies: Vec<String>,
}

/// Read a team stats payload.
///
/// Fields sit either at the top level or under `team`; an empty or failed
/// payload still yields a profile named `Team {id}` with `N/A` details.
pub fn team_profile(team_id: &str, stats: &Value) -> TeamProfile {
    let stats = unwrap_data(stats);
    let na = |candidates: &[&str]| text_or(&stats, candidates, "N/A");

    let trophies = first_array(&stats, &["trophyCabinet", "team.trophyCabinet"])
        .iter()
        .filter_map(|t| match t {
            Value::String(name) => Some(name.trim().to_string()).filter(|n| !n.is_empty()),
            other => text(other, &["name", "title", "trophy"]),
        })
        .collect();

    TeamProfile {
        id: team_id.trim().to_string(),
        name: text(&stats, &["teamName", "name", "team.name", "team.teamName"])
            .unwrap_or_else(|| format!("Team {}", team_id.trim())),
        code: text_or(&stats, &["teamSName", "code", "team.teamSName", "team.code"], ""),
        location: na(&["country", "location", "team.country", "team.location"]),
        captain: na(&["captain", "team.captain"]),
        coach: na(&["coach", "team.coach"]),
        overview: text(&stats, &["overview", "team.overview"]),
        t20_rank: text(&stats, &["rankings.t20", "t20Rank", "team.rankings.t20"]),
        trophies,
    }
}

/// A scheduled or completed match in a team's calendar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamFixture {
    pub id: String,
    pub description: String,
    pub series: String,
    pub venue: String,
    pub start: String,
    pub status: String,
}

impl TeamFixture {
    /// `None` for rows that carry no match at all (ad slots, day headers)
    pub fn from_value(value: &Value) -> Option<Self> {
        let id = text(value, &["matchId", "matchInfo.matchId", "match.matchId", "id"]);
        let description = text(
            value,
            &["matchDesc", "matchInfo.matchDesc", "match.matchDesc"],
        );
        let series = text(
            value,
            &["seriesName", "matchInfo.seriesName", "series.name"],
        );
        if id.is_none() && description.is_none() && series.is_none() {
            return None;
        }

        Some(Self {
            id: id.unwrap_or_default(),
            description: description.unwrap_or_else(|| "Match".to_string()),
            series: series.unwrap_or_else(|| "Series".to_string()),
            venue: text_or(
                value,
                &["venueInfo.ground", "matchInfo.venueInfo.ground", "venue"],
                "Venue TBD",
            ),
            start: text_or(value, &["matchInfo.startDate", "startDate", "date"], ""),
            status: text_or(value, &["matchInfo.status", "status", "state"], ""),
        })
    }
}

/// Nested arrays are flattened and day groups are opened up
fn fixture_rows(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.iter().flat_map(fixture_rows).collect(),
        Value::Object(_) => {
            let day = first_array(value, &["matchDetailsMap.match"]);
            if day.is_empty() {
                vec![value.clone()]
            } else {
                day.iter().flat_map(fixture_rows).collect()
            }
        }
        _ => Vec::new(),
    }
}

/// Matches from a team schedule or results payload
pub fn team_fixtures(body: &Value) -> Vec<TeamFixture> {
    let body = unwrap_data(body);
    as_list(&body, &["matchScheduleMap", "matchDetails", "list", "matches"])
        .iter()
        .flat_map(fixture_rows)
        .filter_map(|m| TeamFixture::from_value(&m))
        .collect()
}
