//! Backend endpoint paths
//!
//! Every path is built in one place so that the cache sees the same literal
//! URL string for the same request, query parameters included.

pub const LOGIN: &str = "/api/v1/auth/login";
pub const REGISTER: &str = "/api/v1/auth/register";
pub const PROFILE: &str = "/api/v1/user/profile";

const CRICKET: &str = "/api/v1/cricket";

/// Ranking tables published by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RankingCategory {
    /// Team rankings
    #[default]
    Teams,
    /// Batting rankings
    Batsmen,
    /// Bowling rankings
    Bowlers,
    /// All-rounder rankings
    Allrounders,
}

impl RankingCategory {
    fn segment(self) -> &'static str {
        match self {
            RankingCategory::Teams => "international",
            RankingCategory::Batsmen => "batsmen",
            RankingCategory::Bowlers => "bowlers",
            RankingCategory::Allrounders => "allrounders",
        }
    }
}

/// Match format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum GameFormat {
    Test,
    Odi,
    #[default]
    T20,
}

impl GameFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            GameFormat::Test => "test",
            GameFormat::Odi => "odi",
            GameFormat::T20 => "t20",
        }
    }
}

/// Team listing filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TeamKind {
    #[default]
    All,
    International,
    League,
    Domestic,
    Women,
}

impl TeamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TeamKind::All => "all",
            TeamKind::International => "international",
            TeamKind::League => "league",
            TeamKind::Domestic => "domestic",
            TeamKind::Women => "women",
        }
    }
}

pub fn live() -> String {
    format!("{CRICKET}/live")
}

pub fn upcoming() -> String {
    format!("{CRICKET}/upcoming")
}

pub fn recent() -> String {
    format!("{CRICKET}/recent")
}

pub fn match_detail(id: &str) -> String {
    format!("{CRICKET}/match/{}", id.trim())
}

pub fn scorecard(id: &str) -> String {
    format!("{CRICKET}/scorecard/{}", id.trim())
}

pub fn commentary(id: &str) -> String {
    format!("{CRICKET}/commentary/{}", id.trim())
}

pub fn squads(id: &str) -> String {
    format!("{CRICKET}/squads/{}", id.trim())
}

pub fn series_list() -> String {
    format!("{CRICKET}/series")
}

pub fn series_detail(id: &str) -> String {
    format!("{CRICKET}/series/{}", id.trim())
}

pub fn news() -> String {
    format!("{CRICKET}/news")
}

/// Rankings for a category; `isWomen` is sent as "0"/"1" like the web client
pub fn rankings(category: RankingCategory, format: GameFormat, women: bool) -> String {
    format!(
        "{CRICKET}/rankings/{}?format={}&isWomen={}",
        category.segment(),
        format.as_str(),
        if women { "1" } else { "0" }
    )
}

pub fn teams(kind: TeamKind) -> String {
    format!("{CRICKET}/teams/{}", kind.as_str())
}

pub fn team_players(team_id: &str) -> String {
    format!("{CRICKET}/team/{}/players", team_id.trim())
}

pub fn team_stats(team_id: &str) -> String {
    format!("{CRICKET}/team/{}/stats", team_id.trim())
}

pub fn team_schedule(team_id: &str) -> String {
    format!("{CRICKET}/team/{}/schedule", team_id.trim())
}

pub fn team_results(team_id: &str) -> String {
    format!("{CRICKET}/team/{}/results", team_id.trim())
}

/// Normalize a user-supplied path so it can be used as a request and cache key
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_paths() {
        assert_eq!(live(), "/api/v1/cricket/live");
        assert_eq!(match_detail("41881"), "/api/v1/cricket/match/41881");
        assert_eq!(scorecard(" 41881 "), "/api/v1/cricket/scorecard/41881");
        assert_eq!(commentary("7"), "/api/v1/cricket/commentary/7");
        assert_eq!(squads("7"), "/api/v1/cricket/squads/7");
    }

    #[test]
    fn test_rankings_path_includes_query() {
        assert_eq!(
            rankings(RankingCategory::Teams, GameFormat::T20, false),
            "/api/v1/cricket/rankings/international?format=t20&isWomen=0"
        );
        assert_eq!(
            rankings(RankingCategory::Bowlers, GameFormat::Odi, true),
            "/api/v1/cricket/rankings/bowlers?format=odi&isWomen=1"
        );
    }

    #[test]
    fn test_rankings_paths_are_distinct_per_query() {
        let men = rankings(RankingCategory::Batsmen, GameFormat::Test, false);
        let women = rankings(RankingCategory::Batsmen, GameFormat::Test, true);
        assert_ne!(men, women);
    }

    #[test]
    fn test_team_paths() {
        assert_eq!(teams(TeamKind::All), "/api/v1/cricket/teams/all");
        assert_eq!(teams(TeamKind::Women), "/api/v1/cricket/teams/women");
        assert_eq!(team_players("2"), "/api/v1/cricket/team/2/players");
        assert_eq!(team_stats(" 2"), "/api/v1/cricket/team/2/stats");
        assert_eq!(team_schedule("2"), "/api/v1/cricket/team/2/schedule");
        assert_eq!(team_results("2"), "/api/v1/cricket/team/2/results");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("api/v1/cricket/news"), "/api/v1/cricket/news");
        assert_eq!(normalize_path(" /x "), "/x");
    }
}
