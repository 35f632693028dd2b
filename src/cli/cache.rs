//! Cache management commands

use chrono::Utc;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::output::formatters::{format_age, format_millis_local, format_size};
use crate::output::json::format_json;

/// Show cache status/statistics
pub fn status(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let stats = ctx.cache_admin().stats()?;
    let ttl = ctx.config.cache_ttl().as_secs();

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "total_entries": stats.total_entries,
                "fresh_entries": stats.fresh_entries,
                "stale_entries": stats.stale_entries,
                "total_size_bytes": stats.total_size_bytes,
                "total_size_human": format_size(stats.total_size_bytes),
                "oldest_entry_timestamp": stats.oldest_entry,
                "newest_entry_timestamp": stats.newest_entry,
                "ttl_secs": ttl,
                "enabled": ctx.fetcher.is_enabled(),
                "path": ctx.data_dir.display().to_string(),
            });
            println!("{}", format_json(&json)?);
        }
        _ => {
            println!("Cache Status");
            println!("────────────────────────────────────────");
            println!("Location:       {}", ctx.data_dir.display());
            println!("TTL:            {}s", ttl);
            println!("Fresh entries:  {}", stats.fresh_entries);
            println!("Stale:          {}", stats.stale_entries);
            println!("Total size:     {}", format_size(stats.total_size_bytes));

            if let Some(oldest) = stats.oldest_entry {
                println!(
                    "Oldest entry:   {} ({})",
                    format_millis_local(oldest),
                    format_age(oldest, Utc::now())
                );
            }
            if let Some(newest) = stats.newest_entry {
                println!(
                    "Newest entry:   {} ({})",
                    format_millis_local(newest),
                    format_age(newest, Utc::now())
                );
            }
        }
    }

    Ok(())
}

/// Remove every cached response; the session is kept
pub fn clear(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let stats = ctx.cache_admin().clear()?;

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "entries_removed": stats.entries_removed,
                "success": true,
            });
            println!("{}", format_json(&json)?);
        }
        _ => {
            if stats.entries_removed > 0 {
                println!("Cleared {} cache entries", stats.entries_removed);
            } else {
                println!("Cache was already empty");
            }
        }
    }

    Ok(())
}

/// Show the storage directory
pub fn path(opts: &GlobalOptions) -> Result<()> {
    let dir = crate::storage::SqliteStore::resolve_dir(opts.data_dir_ref())?;
    println!("{}", dir.display());
    Ok(())
}
