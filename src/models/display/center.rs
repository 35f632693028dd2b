//! Scorecard, squad and commentary display models

use serde::Serialize;
use tabled::Tabled;

use super::common::truncate_string;
use crate::models::center::{BatterLine, BowlerLine, CommentaryLine, SquadPlayer};

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct BatterDisplay {
    #[tabled(rename = "BATTER")]
    pub name: String,

    #[tabled(rename = "DISMISSAL")]
    pub dismissal: String,

    #[tabled(rename = "R")]
    pub runs: i64,

    #[tabled(rename = "B")]
    pub balls: i64,

    #[tabled(rename = "4s")]
    pub fours: i64,

    #[tabled(rename = "6s")]
    pub sixes: i64,

    #[tabled(rename = "SR")]
    pub strike_rate: String,
}

impl From<&BatterLine> for BatterDisplay {
    fn from(line: &BatterLine) -> Self {
        Self {
            name: line.name.clone(),
            dismissal: truncate_string(&line.dismissal, 36),
            runs: line.runs,
            balls: line.balls,
            fours: line.fours,
            sixes: line.sixes,
            strike_rate: line.strike_rate.clone(),
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct BowlerDisplay {
    #[tabled(rename = "BOWLER")]
    pub name: String,

    #[tabled(rename = "O")]
    pub overs: String,

    #[tabled(rename = "M")]
    pub maidens: i64,

    #[tabled(rename = "R")]
    pub runs: i64,

    #[tabled(rename = "W")]
    pub wickets: i64,

    #[tabled(rename = "ECON")]
    pub economy: String,
}

impl From<&BowlerLine> for BowlerDisplay {
    fn from(line: &BowlerLine) -> Self {
        Self {
            name: line.name.clone(),
            overs: line.overs.clone(),
            maidens: line.maidens,
            runs: line.runs,
            wickets: line.wickets,
            economy: line.economy.clone(),
        }
    }
}

/// Squad row; the team column repeats so both sides fit one table
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SquadDisplay {
    #[tabled(rename = "TEAM")]
    pub team: String,

    #[tabled(rename = "PLAYER")]
    pub name: String,

    #[tabled(rename = "ROLE")]
    pub role: String,
}

impl SquadDisplay {
    pub fn new(team: &str, player: &SquadPlayer) -> Self {
        let mut name = player.name.clone();
        if player.captain {
            name.push_str(" (c)");
        }
        if player.keeper {
            name.push_str(" (wk)");
        }

        Self {
            team: team.to_string(),
            name,
            role: player.role.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CommentaryDisplay {
    #[tabled(rename = "OVER")]
    pub over: String,

    #[tabled(rename = "EVENT")]
    pub event: String,

    #[tabled(rename = "COMMENTARY")]
    pub text: String,
}

impl From<&CommentaryLine> for CommentaryDisplay {
    fn from(line: &CommentaryLine) -> Self {
        Self {
            over: line.over.clone(),
            event: line.event.label().to_string(),
            text: truncate_string(&line.text, 80),
        }
    }
}
