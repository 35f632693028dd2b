//! Sign-in, registration and sign-out

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::AuthApi;
use crate::client::models::{LoginRequest, RegisterRequest, SessionUser};
use crate::error::{Error, Result};
use crate::output::json::format_json;

fn prompt_text(prompt: &str) -> Result<String> {
    Ok(Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?)
}

fn or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => Ok(v.trim().to_string()),
        None => prompt_text(prompt),
    }
}

/// Sign in with an existing session context
async fn sign_in(ctx: &CommandContext, username: String, password: String) -> Result<SessionUser> {
    let response = ctx
        .client
        .login(&LoginRequest { username, password })
        .await
        .map_err(|e| {
            if e.is_unauthorized() {
                Error::Other("Invalid username or password".to_string())
            } else {
                e
            }
        })?;

    ctx.session.establish(&response.token, &response.user)?;
    Ok(response.user)
}

fn report_signed_in(user: &SessionUser, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", format_json(user)?);
    } else {
        println!("{} Signed in as {}", "✓".green(), user.username.bold());
    }
    Ok(())
}

/// Run the login command
pub async fn login(
    opts: &GlobalOptions,
    username: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let username = or_prompt(username, "Username")?;
    let password = match password {
        Some(p) => p,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?,
    };

    let user = sign_in(&ctx, username, password).await?;
    report_signed_in(&user, ctx.format)
}

/// Arguments for the register command
#[derive(Debug, Default)]
pub struct RegisterInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub favorite_team: Option<String>,
}

/// Create an account, then sign in with it
pub async fn register(opts: &GlobalOptions, input: RegisterInput) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let username = or_prompt(input.username, "Username")?;
    let email = or_prompt(input.email, "Email")?;
    if !email.contains('@') {
        return Err(Error::Other(format!("'{}' is not an email address", email)));
    }
    let password = match input.password {
        Some(p) => p,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    let request = RegisterRequest {
        username: username.clone(),
        email,
        password: password.clone(),
        favorite_team: input.favorite_team.filter(|t| !t.trim().is_empty()),
    };
    let message = ctx.client.register(&request).await?;
    if ctx.format != OutputFormat::Json && !message.message.is_empty() {
        println!("{}", message.message);
    }

    let user = sign_in(&ctx, username, password).await?;
    report_signed_in(&user, ctx.format)
}

/// Forget the stored token and user
pub fn logout(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let was_signed_in = ctx.session.user().map(|u| u.username);
    ctx.session.sign_out()?;

    match (ctx.format, was_signed_in) {
        (OutputFormat::Json, user) => {
            let output = serde_json::json!({ "signed_out": user.is_some(), "username": user });
            println!("{}", format_json(&output)?);
        }
        (_, Some(user)) => println!("{} Signed out {}", "✓".green(), user),
        (_, None) => println!("Not signed in."),
    }
    Ok(())
}
