//! Match center commands: summary, scorecard, commentary and squads

use colored::Colorize;
use serde_json::Value;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::{fetch_with_spinner, watch_url};
use crate::cli::{CommandContext, OutputFormat};
use crate::client::endpoints;
use crate::error::Result;
use crate::models::center::{self, BallEvent, ScorecardInnings};
use crate::models::display::{
    BatterDisplay, BowlerDisplay, CommentaryDisplay, MatchDisplay, SquadDisplay,
};
use crate::models::matches::{MatchPhase, MatchSummary};
use crate::output::Formattable;
use crate::output::json::format_json;
use crate::output::table::format_table;

/// Show one match, optionally polling
pub async fn get(opts: &GlobalOptions, match_id: &str, watch: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let url = endpoints::match_detail(match_id);

    if watch {
        let format = ctx.format;
        return watch_url(&ctx, &url, ctx.config.match_interval(), |body| {
            print_match(&MatchSummary::from_value(body), format)
        })
        .await;
    }

    let body = fetch_with_spinner(&ctx, &url, "match").await?;
    print_match(&MatchSummary::from_value(&body), ctx.format)
}

fn print_match(summary: &MatchSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "match": summary,
                "phase": summary.phase(),
                "winner": summary.winner(),
                "batting": summary.batting_team(),
            });
            println!("{}", format_json(&output)?);
        }
        OutputFormat::Table => vec![MatchDisplay::from(summary)].print(format)?,
        OutputFormat::Pretty => print_match_pretty(summary),
    }
    Ok(())
}

/// Colored multi-line view of a match
pub fn print_match_pretty(m: &MatchSummary) {
    println!("{}", m.title.bold());

    let mut meta = vec![m.format.clone()];
    if !m.description.is_empty() {
        meta.push(m.description.clone());
    }
    meta.push(m.venue.clone());
    println!("{}", meta.join(" · ").dimmed());

    for innings in &m.innings {
        let line = format!("  {:<32} {}", innings.label, innings.score_line());
        if m.batting_team().is_some_and(|team| innings.belongs_to(team))
            && Some(innings) == m.live_innings()
        {
            println!("{}", line.cyan().bold());
        } else {
            println!("{}", line);
        }
    }

    if m.is_done() {
        println!("{}", m.status.green());
        if let Some(winner) = m.winner() {
            println!("  {} {}", "Winner:".bold(), winner);
        }
    } else {
        println!("{}", m.status.yellow());
        match m.phase() {
            Some(MatchPhase::FirstInnings {
                run_rate: Some(rate),
            }) => println!("  CRR {:.2}", rate),
            Some(MatchPhase::InningsBreak { target }) => println!("  Target {}", target),
            Some(MatchPhase::Chase {
                target,
                runs_left,
                overs_left,
                required_rate,
            }) if runs_left > 0 => {
                let rrr = required_rate
                    .map(|r| format!(" · RRR {:.2}", r))
                    .unwrap_or_default();
                println!(
                    "  Target {} · need {} from {:.1} overs{}",
                    target, runs_left, overs_left, rrr
                );
            }
            _ => {}
        }
    }
}

/// Full scorecard
pub async fn scorecard(opts: &GlobalOptions, match_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let body = fetch_with_spinner(&ctx, &endpoints::scorecard(match_id), "scorecard").await?;
    let innings = center::scorecard(&body);

    if ctx.format == OutputFormat::Json {
        println!("{}", format_json(&innings)?);
        return Ok(());
    }

    if innings.is_empty() {
        println!("Scorecard not available yet.");
        return Ok(());
    }

    for inn in &innings {
        print_innings(inn, ctx.format);
    }
    Ok(())
}

fn print_innings(inn: &ScorecardInnings, format: OutputFormat) {
    let heading = format!("{}  {}", inn.team, inn.total());
    if format == OutputFormat::Pretty {
        println!("{}", heading.bold());
    } else {
        println!("{}", heading);
    }

    let batters: Vec<BatterDisplay> = inn.batters.iter().map(BatterDisplay::from).collect();
    println!("{}", format_table(&batters));

    let bowlers: Vec<BowlerDisplay> = inn.bowlers.iter().map(BowlerDisplay::from).collect();
    println!("{}", format_table(&bowlers));
    println!();
}

/// Ball-by-ball commentary, latest first
pub async fn commentary(opts: &GlobalOptions, match_id: &str, limit: Option<usize>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let body = fetch_with_spinner(&ctx, &endpoints::commentary(match_id), "commentary").await?;

    let mut lines = center::commentary(&body);
    if let Some(limit) = limit {
        lines.truncate(limit);
    }

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&lines)?),
        OutputFormat::Table => lines
            .iter()
            .map(CommentaryDisplay::from)
            .collect::<Vec<_>>()
            .print(ctx.format)?,
        OutputFormat::Pretty => {
            if lines.is_empty() {
                println!("No commentary yet.");
            }
            for line in &lines {
                let tag = match line.event {
                    BallEvent::Six => " SIX ".on_magenta().bold().to_string(),
                    BallEvent::Four => " FOUR ".on_blue().bold().to_string(),
                    BallEvent::Wicket => " OUT ".on_red().bold().to_string(),
                    BallEvent::Wide | BallEvent::NoBall => line.event.label().yellow().to_string(),
                    BallEvent::Normal => String::new(),
                };
                println!("{} {} {}", format!("{:>6}", line.over).dimmed(), tag, line.text);
            }
        }
    }
    Ok(())
}

/// Both squads
pub async fn squads(opts: &GlobalOptions, match_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let body = fetch_with_spinner(&ctx, &endpoints::squads(match_id), "squads").await?;
    print_squads(&body, ctx.format)
}

fn print_squads(body: &Value, format: OutputFormat) -> Result<()> {
    let sides = center::squads(body);

    match format {
        OutputFormat::Json => println!("{}", format_json(&sides)?),
        OutputFormat::Table => sides
            .iter()
            .flat_map(|side| side.players.iter().map(|p| SquadDisplay::new(&side.team, p)))
            .collect::<Vec<_>>()
            .print(format)?,
        OutputFormat::Pretty => {
            for side in &sides {
                println!("{} ({} players)", side.team.bold(), side.players.len());
                if side.players.is_empty() {
                    println!("  {}", "Squad not announced".dimmed());
                }
                for player in &side.players {
                    let row = SquadDisplay::new(&side.team, player);
                    println!("  {:<6} {}", row.role.dimmed(), row.name);
                }
                println!();
            }
        }
    }
    Ok(())
}
