//! Live, upcoming and recent match lists

use colored::Colorize;
use serde_json::Value;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::{fetch_with_spinner, run_list_command, watch_url};
use crate::cli::matches::print_match_pretty;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::endpoints;
use crate::error::Result;
use crate::models::display::MatchDisplay;
use crate::models::matches::{MatchSummary, match_list, partition_live};
use crate::output::Formattable;
use crate::output::json::format_json;

/// Live matches, ongoing first
pub async fn live(opts: &GlobalOptions, watch: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let url = endpoints::live();

    if watch {
        let format = ctx.format;
        return watch_url(&ctx, &url, ctx.config.live_interval(), |body| {
            print_live(body, format)
        })
        .await;
    }

    let body = fetch_with_spinner(&ctx, &url, "live matches").await?;
    print_live(&body, ctx.format)
}

fn print_live(body: &Value, format: OutputFormat) -> Result<()> {
    let (ongoing, finished) = partition_live(match_list(body));

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "live": ongoing, "finished": finished });
            println!("{}", format_json(&output)?);
        }
        OutputFormat::Table => ongoing
            .iter()
            .chain(finished.iter())
            .map(MatchDisplay::from)
            .collect::<Vec<_>>()
            .print(format)?,
        OutputFormat::Pretty => {
            print_section("Live", &ongoing);
            print_section("Finished", &finished);
            if ongoing.is_empty() && finished.is_empty() {
                println!("No matches in progress.");
            }
        }
    }
    Ok(())
}

fn print_section(title: &str, matches: &[MatchSummary]) {
    if matches.is_empty() {
        return;
    }
    println!("{} ({})\n", title.bold().underline(), matches.len());
    for m in matches {
        print_match_pretty(m);
        println!("  {}\n", format!("id {}", m.id).dimmed());
    }
}

/// Fixtures yet to start
pub async fn upcoming(opts: &GlobalOptions) -> Result<()> {
    run_list_command::<MatchSummary, MatchDisplay, _>(
        opts,
        &endpoints::upcoming(),
        "upcoming matches",
        match_list,
    )
    .await
}

/// Recently finished matches
pub async fn recent(opts: &GlobalOptions) -> Result<()> {
    run_list_command::<MatchSummary, MatchDisplay, _>(
        opts,
        &endpoints::recent(),
        "recent matches",
        match_list,
    )
    .await
}
