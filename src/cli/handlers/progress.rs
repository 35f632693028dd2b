//! Spinner shown while a request is outstanding

use std::io::IsTerminal;
use std::time::Duration;

use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;

/// Spinner on stderr, only for interactive pretty/table output
fn spinner(message: &str, format: OutputFormat) -> Option<ProgressBar> {
    if format == OutputFormat::Json || !std::io::stderr().is_terminal() {
        return None;
    }

    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::default_spinner());
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    Some(bar)
}

/// GET `url` through the cache, with a spinner while it runs
pub async fn fetch_with_spinner(ctx: &CommandContext, url: &str, what: &str) -> Result<Value> {
    let bar = spinner(&format!("Loading {}...", what), ctx.format);
    let result = ctx.get(url).await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    result
}

/// GET every url concurrently and keep each outcome; one failure does not
/// cancel the others
pub async fn fetch_all_settled(
    ctx: &CommandContext,
    urls: &[String],
    what: &str,
) -> Vec<Result<Value>> {
    let bar = spinner(&format!("Loading {}...", what), ctx.format);
    let results = join_all(urls.iter().map(|url| ctx.get(url))).await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    results
}
