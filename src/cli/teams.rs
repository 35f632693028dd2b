//! Team directory commands

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use crate::cli::CommandContext;
use crate::cli::OutputFormat;
use crate::cli::args::{GlobalOptions, SearchArgs};
use crate::cli::handlers::{fetch_all_settled, fetch_with_spinner, run_list_command};
use crate::client::endpoints::{self, TeamKind};
use crate::error::Result;
use crate::models::center::PlayerRole;
use crate::models::display::{FixtureDisplay, PlayerDisplay, TeamDisplay};
use crate::models::teams::{
    TeamFixture, TeamPlayer, TeamProfile, team_fixtures, team_groups, team_players, team_profile,
};
use crate::output::Formattable;
use crate::output::json::format_json;
use crate::output::table::format_table;

/// Sections of a team profile, in request order
const SECTIONS: [&str; 4] = ["squad", "stats", "schedule", "results"];

/// Run the teams list command
pub async fn list(opts: &GlobalOptions, kind: TeamKind, search: &SearchArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let body = fetch_with_spinner(&ctx, &endpoints::teams(kind), "teams").await?;

    let groups = team_groups(&body, kind.as_str(), search.query());

    if ctx.format == OutputFormat::Json {
        println!("{}", format_json(&groups)?);
        return Ok(());
    }

    let rows: Vec<TeamDisplay> = groups
        .iter()
        .flat_map(|g| g.teams.iter().map(|t| TeamDisplay::new(&g.category, t)))
        .collect();
    search.take(rows).print(ctx.format)
}

/// Run the teams players command
pub async fn players(opts: &GlobalOptions, team_id: &str, role: Option<PlayerRole>) -> Result<()> {
    run_list_command::<TeamPlayer, PlayerDisplay, _>(
        opts,
        &endpoints::team_players(team_id),
        "players",
        |body| team_players(body, role),
    )
    .await
}

/// Everything shown on a team profile
#[derive(Debug, Serialize)]
pub struct TeamDetail {
    pub team: TeamProfile,
    pub squad: Vec<TeamPlayer>,
    pub schedule: Vec<TeamFixture>,
    pub results: Vec<TeamFixture>,
    /// `section: error` for every request that failed
    pub unavailable: Vec<String>,
}

/// Build a profile from the four section outcomes.
///
/// Failed sections are reported and rendered empty. Only when every request
/// failed is the first error returned.
fn settle(team_id: &str, outcomes: Vec<Result<Value>>) -> Result<TeamDetail> {
    let mut bodies = Vec::with_capacity(SECTIONS.len());
    let mut unavailable = Vec::new();
    let mut first_error = None;

    for (section, outcome) in SECTIONS.iter().zip(outcomes) {
        match outcome {
            Ok(body) => bodies.push(body),
            Err(err) => {
                log::warn!("Team {} {} unavailable: {}", team_id, section, err);
                unavailable.push(format!("{}: {}", section, err));
                first_error.get_or_insert(err);
                bodies.push(Value::Null);
            }
        }
    }

    if unavailable.len() == SECTIONS.len()
        && let Some(err) = first_error
    {
        return Err(err);
    }

    let mut bodies = bodies.into_iter();
    let mut next = || bodies.next().unwrap_or(Value::Null);
    let (players, stats, schedule, results) = (next(), next(), next(), next());

    Ok(TeamDetail {
        team: team_profile(team_id, &stats),
        squad: team_players(&players, None),
        schedule: team_fixtures(&schedule),
        results: team_fixtures(&results),
        unavailable,
    })
}

/// Run the teams get command: profile, squad, schedule and results
pub async fn get(opts: &GlobalOptions, team_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let urls = [
        endpoints::team_players(team_id),
        endpoints::team_stats(team_id),
        endpoints::team_schedule(team_id),
        endpoints::team_results(team_id),
    ];

    let outcomes = fetch_all_settled(&ctx, &urls, "team").await;
    let detail = settle(team_id, outcomes)?;

    if ctx.format == OutputFormat::Json {
        println!("{}", format_json(&detail)?);
        return Ok(());
    }
    print_detail(&detail, ctx.format);
    Ok(())
}

fn print_detail(detail: &TeamDetail, format: OutputFormat) {
    let team = &detail.team;
    let title = match team.code.as_str() {
        "" => team.name.clone(),
        code => format!("{} ({})", team.name, code),
    };
    if format == OutputFormat::Pretty {
        println!("{}", title.bold());
    } else {
        println!("{}", title);
    }
    println!(
        "Location: {}   Captain: {}   Coach: {}",
        team.location, team.captain, team.coach
    );
    if let Some(rank) = &team.t20_rank {
        println!("T20 rank: #{}", rank);
    }
    if let Some(overview) = &team.overview {
        println!("{}", overview.dimmed());
    }
    if !team.trophies.is_empty() {
        println!("Trophies: {}", team.trophies.join(", "));
    }
    for note in &detail.unavailable {
        println!("{} {} unavailable", "⚠".yellow(), note);
    }

    let squad: Vec<PlayerDisplay> = detail.squad.iter().map(PlayerDisplay::from).collect();
    println!("\n{}", "Squad".bold());
    println!("{}", format_table(&squad));

    for (heading, fixtures) in [("Schedule", &detail.schedule), ("Results", &detail.results)] {
        let rows: Vec<FixtureDisplay> = fixtures.iter().map(FixtureDisplay::from).collect();
        println!("\n{}", heading.bold());
        println!("{}", format_table(&rows));
    }
}
