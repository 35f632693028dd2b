//! Generic list command handler
//!
//! Most read commands follow the same flow:
//! 1. Create command context
//! 2. Fetch the endpoint through the cache
//! 3. Normalize the payload with a domain reader
//! 4. Convert to display rows and print

use log::debug;
use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::cli::handlers::fetch_with_spinner;
use crate::error::Result;
use crate::output::Formattable;

/// Run a standard list command with the fetch → read → display → print pattern.
///
/// * `T` - normalized item produced by `read`
/// * `D` - display row built from `&T`
///
/// ```ignore
/// run_list_command::<RankingEntry, RankingDisplay, _>(
///     opts,
///     &endpoints::rankings(category, format, false),
///     "rankings",
///     |body| rankings(body, None),
/// ).await
/// ```
pub async fn run_list_command<T, D, F>(
    opts: &GlobalOptions,
    url: &str,
    resource_name: &str,
    read: F,
) -> Result<()>
where
    D: for<'a> From<&'a T> + Tabled + Serialize,
    F: FnOnce(&Value) -> Vec<T>,
{
    let ctx = CommandContext::new(opts)?;

    debug!("Fetching {} from {}", resource_name, url);
    let body = fetch_with_spinner(&ctx, url, resource_name).await?;

    let items = read(&body);
    debug!("Read {} {}", items.len(), resource_name);

    let display_items: Vec<D> = items.iter().map(D::from).collect();
    display_items.print(ctx.format)?;

    Ok(())
}
