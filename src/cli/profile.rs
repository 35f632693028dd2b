//! Profile commands for the signed-in user

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::ProfileApi;
use crate::client::models::{UserProfile, UserProfileUpdate};
use crate::error::{ApiError, Result};
use crate::output::json::format_json;

fn print_profile(profile: &UserProfile, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", format_json(profile)?);
        return Ok(());
    }

    println!("{}", profile.username.bold());
    println!("  Email:         {}", profile.email);
    println!("  Role:          {}", profile.role);
    println!(
        "  Favorite team: {}",
        profile.favorite_team.as_deref().unwrap_or("--")
    );
    Ok(())
}

fn require_session(ctx: &CommandContext) -> Result<()> {
    if ctx.session.is_authenticated() {
        Ok(())
    } else {
        Err(ApiError::Unauthorized.into())
    }
}

/// Show the profile
pub async fn get(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    require_session(&ctx)?;

    let profile = ctx.client.get_profile().await?;
    print_profile(&profile, ctx.format)
}

/// Change the favorite team; an empty value clears it
pub async fn set(opts: &GlobalOptions, favorite_team: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    require_session(&ctx)?;

    let team = favorite_team.trim();
    let update = UserProfileUpdate {
        favorite_team: (!team.is_empty()).then(|| team.to_string()),
    };
    let profile = ctx.client.update_profile(&update).await?;

    if let Some(user) = ctx.session.user() {
        ctx.session.update_user(&profile.apply_to(&user))?;
    }

    if ctx.format != OutputFormat::Json {
        println!("{} Profile updated", "✓".green());
    }
    print_profile(&profile, ctx.format)
}
