//! Status command implementation

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::formatters::{format_duration_secs, format_size};
use crate::output::json::format_json;

/// Expiry (`exp` claim) of a JWT, read without verifying the signature
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    DateTime::from_timestamp(claims.get("exp")?.as_i64()?, 0)
}

#[derive(Debug, Serialize)]
struct StatusReport {
    config_path: String,
    api_url: String,
    data_dir: String,
    signed_in: bool,
    username: Option<String>,
    favorite_team: Option<String>,
    token_expires_at: Option<String>,
    cache_enabled: bool,
    cache_entries: usize,
    cache_size_bytes: usize,
}

/// Run the status command to display configuration and session state
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let config_path = Config::resolve_path(opts.config_ref())?;
    let user = ctx.session.user();
    let expiry = ctx.session.token().as_deref().and_then(token_expiry);
    let stats = ctx.cache_admin().stats()?;

    let report = StatusReport {
        config_path: config_path.display().to_string(),
        api_url: ctx.client.base_url().to_string(),
        data_dir: ctx.data_dir.display().to_string(),
        signed_in: ctx.session.is_authenticated(),
        username: user.as_ref().map(|u| u.username.clone()),
        favorite_team: user.as_ref().and_then(|u| u.favorite_team.clone()),
        token_expires_at: expiry.map(|e| e.to_rfc3339()),
        cache_enabled: ctx.fetcher.is_enabled(),
        cache_entries: stats.total_entries,
        cache_size_bytes: stats.total_size_bytes,
    };

    if ctx.format == OutputFormat::Json {
        println!("{}", format_json(&report)?);
        return Ok(());
    }

    println!("{}\n", "CricSphere Status".bold());
    let config_note = if config_path.exists() { "" } else { " (defaults)" };
    println!(
        "Config file: {}{}",
        report.config_path.cyan(),
        config_note.dimmed()
    );
    println!("Backend:     {}", report.api_url.cyan());
    println!("Data dir:    {}", report.data_dir);
    println!();

    match &report.username {
        Some(name) if report.signed_in => {
            println!("{} Signed in as {}", "✓".green(), name.bold());
            if let Some(team) = &report.favorite_team {
                println!("  Favorite team: {}", team);
            }
        }
        _ if report.signed_in => println!("{} Token stored, no user record", "⚠".yellow()),
        _ => {
            println!("{} Not signed in", "○".dimmed());
            println!("  → Run 'cricsphere login' to sign in");
        }
    }

    if let Some(expires) = expiry {
        let remaining = expires.signed_duration_since(Utc::now()).num_seconds();
        if remaining > 0 {
            println!(
                "{} Token valid (expires in {})",
                "✓".green(),
                format_duration_secs(remaining)
            );
        } else {
            println!("{} Token expired; the next request will sign you out", "⚠".yellow());
        }
    }

    println!();
    if report.cache_enabled {
        println!(
            "{} Cache: {} entries, {}",
            "✓".green(),
            report.cache_entries,
            format_size(report.cache_size_bytes)
        );
    } else {
        println!("{} Cache disabled", "○".dimmed());
    }

    Ok(())
}
