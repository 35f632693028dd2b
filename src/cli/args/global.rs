//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;

/// Global CLI options passed to all command handlers.
///
/// Precedence is CLI flag > environment variable > config file > default.
/// This struct holds the CLI/env layer; [`GlobalOptions::resolve_format`]
/// folds in the config file.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format, when given on the command line or in the environment
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.cricsphere/config.yaml)
    pub config: Option<String>,

    /// Backend URL override
    pub api_url: Option<String>,

    /// Storage directory override
    pub data_dir: Option<String>,

    /// Bypass the response cache
    pub no_cache: bool,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_url: cli.api_url.clone(),
            data_dir: cli.data_dir.clone(),
            no_cache: cli.no_cache,
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn api_url_ref(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    pub fn data_dir_ref(&self) -> Option<&str> {
        self.data_dir.as_deref()
    }

    /// Output format after applying the config file preference
    pub fn resolve_format(&self, config: &Config) -> OutputFormat {
        self.format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .and_then(OutputFormat::from_config)
            })
            .unwrap_or_default()
    }
}
