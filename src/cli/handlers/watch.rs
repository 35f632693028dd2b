//! Poll an endpoint and redraw on every settled result

use std::io::IsTerminal;
use std::time::Duration;

use chrono::Local;
use colored::Colorize;
use serde_json::Value;

use crate::cache::{FetchOptions, FetchState, Resource};
use crate::cli::CommandContext;
use crate::error::{ApiError, Error, Result};
use crate::session::SessionEvent;

/// Mount a polling resource for `url` and call `render` with each result.
///
/// Runs until Ctrl-C or until the session expires. A failed refresh keeps the
/// last result on screen; a rejected session ends the watch with the 401.
pub async fn watch_url<F>(ctx: &CommandContext, url: &str, every: Duration, mut render: F) -> Result<()>
where
    F: FnMut(&Value) -> Result<()>,
{
    let resource = Resource::new(
        ctx.fetcher.clone(),
        Some(url),
        FetchOptions {
            mode: ctx.fetch_mode(),
            ttl: None,
            refresh_interval: Some(every),
        },
    );
    let mut states = resource.subscribe();
    let mut events = ctx.session.subscribe();

    // A load that settled before we subscribed is still current
    let initial = states.borrow_and_update().clone();
    let mut outcome = show(&initial, every, &mut render);

    while outcome.is_ok() {
        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                outcome = show(&state, every, &mut render);
            }
            event = events.recv() => {
                if let Ok(SessionEvent::Expired { redirect_to }) = event {
                    log::debug!("Watch stopped, session expired ({})", redirect_to);
                    outcome = Err(ApiError::Unauthorized.into());
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    resource.unmount();
    outcome
}

fn show<F>(state: &FetchState, every: Duration, render: &mut F) -> Result<()>
where
    F: FnMut(&Value) -> Result<()>,
{
    if !state.status.is_settled() {
        return Ok(());
    }

    if let Some(err) = &state.error
        && err.is_unauthorized()
    {
        return Err(Error::Shared(err.clone()));
    }

    match (&state.data, &state.error) {
        (Some(data), error) => {
            if std::io::stdout().is_terminal() {
                // Clear screen, cursor home
                print!("\x1B[2J\x1B[H");
            }
            render(data)?;
            if let Some(err) = error {
                eprintln!("{} Refresh failed: {}", "⚠".yellow(), err);
            }
            eprintln!(
                "{}",
                format!(
                    "Updated {} · refreshing every {}s · Ctrl-C to stop",
                    Local::now().format("%H:%M:%S"),
                    every.as_secs()
                )
                .dimmed()
            );
        }
        (None, Some(err)) => eprintln!("{} {}", "✗".red(), err),
        (None, None) => {}
    }

    Ok(())
}
