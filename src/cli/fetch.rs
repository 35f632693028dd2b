//! Raw GET through the cache

use crate::cache::FetchMode;
use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::client::endpoints::normalize_path;
use crate::error::Result;

/// Print the raw JSON body of `path`.
///
/// `refresh` skips the cached copy but still stores the new response.
pub async fn run(opts: &GlobalOptions, path: &str, refresh: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let url = normalize_path(path);

    let mode = match ctx.fetch_mode() {
        FetchMode::CacheFirst if refresh => FetchMode::Refresh,
        mode => mode,
    };
    let body = ctx.fetcher.fetch_with(&url, mode, None).await?;

    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
