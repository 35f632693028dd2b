//! Match center payloads: commentary, scorecard and squads

use serde::Serialize;
use serde_json::Value;

use super::extract::{first_array, flag, number_or, path, text, text_or};

/// What a commentary line describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BallEvent {
    Six,
    Four,
    Wicket,
    Wide,
    NoBall,
    Normal,
}

impl BallEvent {
    /// Classify a commentary line by its wording
    pub fn classify(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("six") {
            BallEvent::Six
        } else if text.contains("four") {
            BallEvent::Four
        } else if text.contains("out") || text.contains("wicket") {
            BallEvent::Wicket
        } else if text.contains("wide") {
            BallEvent::Wide
        } else if text.contains("no ball") || text.contains("noball") {
            BallEvent::NoBall
        } else {
            BallEvent::Normal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BallEvent::Six => "SIX",
            BallEvent::Four => "FOUR",
            BallEvent::Wicket => "WICKET",
            BallEvent::Wide => "WIDE",
            BallEvent::NoBall => "NOBALL",
            BallEvent::Normal => "",
        }
    }
}

/// A single ball-by-ball commentary entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentaryLine {
    pub id: String,
    pub over: String,
    pub text: String,
    pub timestamp: String,
    pub event: BallEvent,
}

/// Commentary lines, latest first.
///
/// Lines without text are dropped.
pub fn commentary(body: &Value) -> Vec<CommentaryLine> {
    let items = first_array(
        body,
        &[
            "commentaryList",
            "commLines",
            "commentary.items",
            "commentary.commentaryList",
            "commentary",
            "data.commentaryList",
            "data.commLines",
            "data.commentary.items",
            "data.commentary",
        ],
    );

    let mut lines: Vec<CommentaryLine> = items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| {
            let text = text(item, &["commText", "commentary", "text", "message", "eventText"])?;
            let over = text_or(item, &["overNumber", "o", "over", "ball", "ballNbr"], "");
            Some(CommentaryLine {
                id: text_or(item, &["id", "commId"], &format!("{}-{}", idx, over)),
                event: BallEvent::classify(&text),
                timestamp: text_or(item, &["timestamp", "time", "ts"], ""),
                over,
                text,
            })
        })
        .collect();

    lines.reverse();
    lines
}

/// One batter's line in a scorecard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatterLine {
    pub name: String,
    pub dismissal: String,
    pub runs: i64,
    pub balls: i64,
    pub fours: i64,
    pub sixes: i64,
    pub strike_rate: String,
}

/// One bowler's line in a scorecard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BowlerLine {
    pub name: String,
    pub overs: String,
    pub maidens: i64,
    pub runs: i64,
    pub wickets: i64,
    pub economy: String,
}

/// A full innings from the scorecard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorecardInnings {
    pub team: String,
    pub runs: i64,
    pub wickets: i64,
    pub overs: String,
    pub batters: Vec<BatterLine>,
    pub bowlers: Vec<BowlerLine>,
}

impl ScorecardInnings {
    fn from_value(value: &Value, idx: usize) -> Self {
        let batters = first_array(
            value,
            &["batters", "batsmen", "batting", "batTeamDetails.batsmenData"],
        )
        .iter()
        .map(|p| BatterLine {
            name: text_or(p, &["name", "batName"], "Player"),
            dismissal: text_or(p, &["outDesc", "out", "howOut"], "not out"),
            runs: number_or(p, &["runs", "r"], 0.0) as i64,
            balls: number_or(p, &["balls", "b"], 0.0) as i64,
            fours: number_or(p, &["fours", "4s"], 0.0) as i64,
            sixes: number_or(p, &["sixes", "6s"], 0.0) as i64,
            strike_rate: text_or(p, &["sr", "strikeRate", "strkRate"], "0.0"),
        })
        .collect();

        let bowlers = first_array(value, &["bowlers", "bowling", "bowlTeamDetails.bowlersData"])
            .iter()
            .map(|b| BowlerLine {
                name: text_or(b, &["name", "bowlName"], "Bowler"),
                overs: text_or(b, &["overs", "o"], "0.0"),
                maidens: number_or(b, &["maidens", "m"], 0.0) as i64,
                runs: number_or(b, &["runs", "r"], 0.0) as i64,
                wickets: number_or(b, &["wickets", "w"], 0.0) as i64,
                economy: text_or(b, &["econ", "economy"], "0.0"),
            })
            .collect();

        Self {
            team: text_or(
                value,
                &["batTeamName", "teamName", "batTeamDetails.batTeamName"],
                &format!("Innings {}", idx + 1),
            ),
            runs: number_or(value, &["runs", "r", "scoreDetails.runs"], 0.0) as i64,
            wickets: number_or(value, &["wickets", "w", "scoreDetails.wickets"], 0.0) as i64,
            overs: text_or(value, &["overs", "o", "scoreDetails.overs"], "0.0"),
            batters,
            bowlers,
        }
    }

    /// `250/7 (50 ov)`
    pub fn total(&self) -> String {
        format!("{}/{} ({} ov)", self.runs, self.wickets, self.overs)
    }
}

/// Scorecard innings, in batting order. Empty when unavailable.
pub fn scorecard(body: &Value) -> Vec<ScorecardInnings> {
    const CONTAINERS: [&str; 7] = [
        "scorecard",
        "scoreCard",
        "matchScorecard",
        "innings",
        "data.scorecard",
        "data.scoreCard",
        "data.matchScorecard",
    ];

    let innings = CONTAINERS
        .iter()
        .find_map(|key| match path(body, key)? {
            Value::Array(items) => Some(items.clone()),
            container @ Value::Object(_) => {
                let items = first_array(container, &["innings", "scoreCard", "inngs"]);
                (!items.is_empty()).then_some(items)
            }
            _ => None,
        })
        .unwrap_or_default();

    innings
        .iter()
        .enumerate()
        .map(|(idx, inn)| ScorecardInnings::from_value(inn, idx))
        .collect()
}

/// Broad playing role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerRole {
    /// Wicket-keeper
    Wk,
    /// All-rounder
    Ar,
    Bowl,
    Bat,
    Player,
}

impl PlayerRole {
    pub fn from_player(player: &Value) -> Self {
        let role = text_or(
            player,
            &["role", "playingRole", "speciality", "specialty", "category"],
            "",
        )
        .to_lowercase();

        if role.contains("wk") || role.contains("keeper") {
            PlayerRole::Wk
        } else if role.contains("all") {
            PlayerRole::Ar
        } else if role.contains("bowl") {
            PlayerRole::Bowl
        } else if role.contains("bat") {
            PlayerRole::Bat
        } else if flag(player, &["isKeeper", "keeper"]) {
            PlayerRole::Wk
        } else {
            PlayerRole::Player
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerRole::Wk => "WK",
            PlayerRole::Ar => "AR",
            PlayerRole::Bowl => "BOWL",
            PlayerRole::Bat => "BAT",
            PlayerRole::Player => "PLAYER",
        }
    }
}

/// Player listed in a squad
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SquadPlayer {
    pub name: String,
    pub role: PlayerRole,
    pub captain: bool,
    pub keeper: bool,
}

impl SquadPlayer {
    pub fn from_value(value: &Value) -> Self {
        let role = PlayerRole::from_player(value);
        let role_text = text_or(value, &["role"], "").to_lowercase();
        Self {
            name: text_or(value, &["name", "fullName", "playerName"], "Unknown Player"),
            captain: flag(value, &["isCaptain", "captain"]) || role_text.contains("captain"),
            keeper: role == PlayerRole::Wk || flag(value, &["isKeeper"]),
            role,
        }
    }
}

/// One side's squad
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Squad {
    pub team: String,
    pub players: Vec<SquadPlayer>,
}

/// Both squads for a match
pub fn squads(body: &Value) -> [Squad; 2] {
    let side = |n: u8| {
        let team_keys = keys_for(
            n,
            &["matchInfo.team{n}.teamName", "team{n}.teamName", "team{n}.name", "team{n}"],
        );
        let player_keys = keys_for(
            n,
            &[
                "squad.team{n}Players",
                "squads.team{n}Players",
                "team{n}Players",
                "team{n}Squad",
                "team{n}.players",
            ],
        );

        Squad {
            team: text(body, &as_strs(&team_keys)).unwrap_or_else(|| format!("Team {n}")),
            players: first_array(body, &as_strs(&player_keys))
                .iter()
                .map(SquadPlayer::from_value)
                .collect(),
        }
    };

    [side(1), side(2)]
}

fn keys_for(n: u8, patterns: &[&str]) -> Vec<String> {
    patterns
        .iter()
        .map(|p| p.replace("{n}", &n.to_string()))
        .collect()
}

fn as_strs(keys: &[String]) -> Vec<&str> {
    keys.iter().map(String::as_str).collect()
}
