//! Series commands

use colored::Colorize;
use serde_json::Value;

use crate::cli::args::{GlobalOptions, SearchArgs};
use crate::cli::handlers::{fetch_with_spinner, run_list_command, watch_url};
use crate::cli::{CommandContext, OutputFormat};
use crate::client::endpoints;
use crate::error::Result;
use crate::models::display::{SeriesDisplay, SeriesMatchDisplay};
use crate::models::series::{SeriesSummary, series_detail, series_list};
use crate::output::json::format_json;
use crate::output::table::format_table;

/// Run the series list command
pub async fn list(opts: &GlobalOptions, search: &SearchArgs) -> Result<()> {
    run_list_command::<SeriesSummary, SeriesDisplay, _>(
        opts,
        &endpoints::series_list(),
        "series",
        |body| search.take(series_list(body, search.query())),
    )
    .await
}

/// Series header plus fixtures, optionally polling
pub async fn get(opts: &GlobalOptions, series_id: &str, watch: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let url = endpoints::series_detail(series_id);

    if watch {
        let format = ctx.format;
        return watch_url(&ctx, &url, ctx.config.series_interval(), |body| {
            print_detail(body, format)
        })
        .await;
    }

    let body = fetch_with_spinner(&ctx, &url, "series").await?;
    print_detail(&body, ctx.format)
}

fn print_detail(body: &Value, format: OutputFormat) -> Result<()> {
    let detail = series_detail(body);

    if format == OutputFormat::Json {
        println!("{}", format_json(&detail)?);
        return Ok(());
    }

    let header = SeriesDisplay::from(&detail.info);
    if format == OutputFormat::Pretty {
        println!("{}", header.name.bold());
        println!("{}", header.dates.dimmed());
    } else {
        println!("{}  {}", header.name, header.dates);
    }
    if header.formats != "--" {
        println!("{}", header.formats);
    }
    println!();

    let fixtures: Vec<SeriesMatchDisplay> =
        detail.matches.iter().map(SeriesMatchDisplay::from).collect();
    println!("{}", format_table(&fixtures));
    Ok(())
}
