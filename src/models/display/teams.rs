//! Team and roster display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{check, format_match_time, or_dash, truncate_string};
use crate::models::teams::{Team, TeamFixture, TeamPlayer};

/// Team display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct TeamDisplay {
    #[tabled(rename = "CATEGORY")]
    pub category: String,

    #[tabled(rename = "TEAM ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "CODE")]
    pub code: String,
}

impl TeamDisplay {
    pub fn new(category: &str, team: &Team) -> Self {
        Self {
            category: category.to_string(),
            id: team.id.clone(),
            name: team.name.clone(),
            code: or_dash(&team.code),
        }
    }
}

/// Roster row.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PlayerDisplay {
    #[tabled(rename = "PLAYER ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "ROLE")]
    pub role: String,

    #[tabled(rename = "INTL")]
    pub international: String,
}

impl From<&TeamPlayer> for PlayerDisplay {
    fn from(player: &TeamPlayer) -> Self {
        Self {
            id: or_dash(&player.id),
            name: player.name.clone(),
            role: player.role.clone(),
            international: check(player.international),
        }
    }
}

/// Schedule or result row on a team profile.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct FixtureDisplay {
    #[tabled(rename = "MATCH ID")]
    pub id: String,

    #[tabled(rename = "DATE")]
    pub date: String,

    #[tabled(rename = "MATCH")]
    pub description: String,

    #[tabled(rename = "SERIES")]
    pub series: String,

    #[tabled(rename = "VENUE")]
    pub venue: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl From<&TeamFixture> for FixtureDisplay {
    fn from(fixture: &TeamFixture) -> Self {
        Self {
            id: or_dash(&fixture.id),
            date: or_dash(&format_match_time(&fixture.start)),
            description: fixture.description.clone(),
            series: truncate_string(&fixture.series, 36),
            venue: truncate_string(&fixture.venue, 30),
            status: or_dash(&truncate_string(&fixture.status, 40)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_row_formats_millis_and_blanks() {
        let fixture = TeamFixture {
            id: String::new(),
            description: "1st Test".to_string(),
            series: "Border-Gavaskar Trophy".to_string(),
            venue: "Perth Stadium".to_string(),
            start: "1767225600000".to_string(),
            status: String::new(),
        };

        let row = FixtureDisplay::from(&fixture);
        assert_eq!(row.id, "--");
        assert_eq!(row.date, "2026-01-01 00:00 UTC");
        assert_eq!(row.status, "--");
    }
}
