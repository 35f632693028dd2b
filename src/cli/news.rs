//! News command

use crate::cli::args::{GlobalOptions, SearchArgs};
use crate::cli::handlers::run_list_command;
use crate::client::endpoints;
use crate::error::Result;
use crate::models::display::NewsDisplay;
use crate::models::news::{NewsStory, news};

/// Latest stories, 20 unless `--limit` says otherwise
pub async fn run(opts: &GlobalOptions, search: &SearchArgs) -> Result<()> {
    let limit = search.limit.unwrap_or(20);
    run_list_command::<NewsStory, NewsDisplay, _>(opts, &endpoints::news(), "news", |body| {
        news(body, search.query(), Some(limit))
    })
    .await
}
