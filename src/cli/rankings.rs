//! ICC rankings command

use crate::cli::CommandContext;
use crate::cli::args::{GlobalOptions, SearchArgs};
use crate::cli::handlers::fetch_with_spinner;
use crate::client::endpoints::{self, GameFormat, RankingCategory};
use crate::error::Result;
use crate::models::display::RankingDisplay;
use crate::models::rankings::{rankings, unavailable_reason};
use crate::output::Formattable;

/// Run the rankings command
pub async fn run(
    opts: &GlobalOptions,
    category: RankingCategory,
    game_format: GameFormat,
    women: bool,
    search: &SearchArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let url = endpoints::rankings(category, game_format, women);
    let body = fetch_with_spinner(&ctx, &url, "rankings").await?;

    let rows = search.take(rankings(&body, search.query()));
    if rows.is_empty()
        && search.query().is_none()
        && let Some(reason) = unavailable_reason(&body)
    {
        println!("Rankings unavailable: {}", reason);
        return Ok(());
    }

    rows.iter()
        .map(RankingDisplay::from)
        .collect::<Vec<_>>()
        .print(ctx.format)
}
