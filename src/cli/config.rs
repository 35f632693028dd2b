//! Configuration file commands

use colored::Colorize;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::output::json::format_json;

/// Print the effective configuration
pub fn show(opts: &GlobalOptions) -> Result<()> {
    let mut config = Config::load_at(opts.config_ref())?;
    let format = opts.resolve_format(&config);
    config.api_url = Some(config.resolve_api_url(opts.api_url_ref()));

    if format == OutputFormat::Json {
        println!("{}", format_json(&config)?);
    } else {
        let yaml = serde_yaml::to_string(&config).map_err(ConfigError::from)?;
        print!("{}", yaml);
    }
    Ok(())
}

/// Print the config file location
pub fn path(opts: &GlobalOptions) -> Result<()> {
    println!("{}", Config::resolve_path(opts.config_ref())?.display());
    Ok(())
}

/// Persist a new backend URL
pub fn set_url(opts: &GlobalOptions, url: &str) -> Result<()> {
    let mut config = Config::load_at(opts.config_ref())?;
    config.api_url = Some(url.trim().trim_end_matches('/').to_string());
    config.validate()?;
    config.save_at(opts.config_ref())?;

    println!(
        "{} Backend set to {}",
        "✓".green(),
        config.resolve_api_url(None).cyan()
    );
    Ok(())
}
