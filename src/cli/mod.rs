//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod auth;
pub mod cache;
pub mod config;
pub mod context;
pub mod fetch;
pub mod handlers;
pub mod live;
pub mod matches;
pub mod news;
pub mod profile;
pub mod rankings;
pub mod series;
pub mod status;
pub mod teams;

pub use args::{OutputFormat, SearchArgs};
pub use context::CommandContext;

use crate::client::endpoints::{GameFormat, RankingCategory, TeamKind};
use crate::models::center::PlayerRole;

/// CricSphere - live cricket scores, schedules and news in the terminal
#[derive(Parser, Debug)]
#[command(name = "cricsphere")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "CRICSPHERE_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Backend base URL
    #[arg(long, global = true, env = "CRICSPHERE_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Override config file location
    #[arg(long, global = true, env = "CRICSPHERE_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the session and cache directory
    #[arg(long, global = true, env = "CRICSPHERE_DATA_DIR", hide_env = true)]
    pub data_dir: Option<String>,

    /// Bypass cache, fetch fresh data from the backend
    #[arg(long, global = true, env = "CRICSPHERE_NO_CACHE", hide_env = true)]
    pub no_cache: bool,

    /// Enable debug logging
    #[arg(long, global = true, env = "CRICSPHERE_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in to the backend
    Login {
        /// Account name (prompted when omitted)
        username: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "CRICSPHERE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Register {
        #[arg(long, short = 'u')]
        username: Option<String>,

        #[arg(long, short = 'e')]
        email: Option<String>,

        /// Password (prompted with confirmation when omitted)
        #[arg(long, env = "CRICSPHERE_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        #[arg(long)]
        favorite_team: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show configuration, session and cache status
    Status,

    /// Display version information
    Version,

    /// Matches in progress
    #[command(after_help = "EXAMPLES:\n  \
            cricsphere live                  # Live and just-finished matches\n  \
            cricsphere live --watch          # Redraw every 30s\n  \
            cricsphere live --format json    # JSON for scripting")]
    Live {
        /// Keep polling and redraw on every update
        #[arg(long, short = 'w')]
        watch: bool,
    },

    /// Fixtures yet to start
    Upcoming,

    /// Recently finished matches
    Recent,

    /// Match center: summary, scorecard, commentary, squads
    #[command(subcommand)]
    Match(MatchCommands),

    /// Series schedules
    #[command(subcommand)]
    Series(SeriesCommands),

    /// ICC rankings
    Rankings {
        #[arg(long, short = 'c', value_enum, default_value = "teams")]
        category: RankingCategory,

        #[arg(long, short = 'g', value_enum, default_value = "t20")]
        game_format: GameFormat,

        /// Women's rankings
        #[arg(long)]
        women: bool,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Team directory
    #[command(subcommand)]
    Teams(TeamsCommands),

    /// Latest news
    News {
        #[command(flatten)]
        search: SearchArgs,
    },

    /// Signed-in user's profile
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// GET any backend path through the cache and print the JSON body
    Fetch {
        /// Path such as /api/v1/cricket/live
        path: String,

        /// Skip the cached copy
        #[arg(long, short = 'r')]
        refresh: bool,
    },

    /// Manage local response cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Manage the config file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(after_help = "\
  bash:   cricsphere completion bash > /etc/bash_completion.d/cricsphere
  zsh:    cricsphere completion zsh > \"${fpath[1]}/_cricsphere\"
  fish:   cricsphere completion fish > ~/.config/fish/completions/cricsphere.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Match center subcommands
#[derive(Subcommand, Debug)]
pub enum MatchCommands {
    /// Score summary and state of play
    #[command(visible_alias = "g")]
    Get {
        match_id: String,

        /// Keep polling and redraw on every update
        #[arg(long, short = 'w')]
        watch: bool,
    },

    /// Batting and bowling cards
    Scorecard { match_id: String },

    /// Ball-by-ball commentary, latest first
    Commentary {
        match_id: String,

        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Playing squads
    Squads { match_id: String },
}

/// Series subcommands
#[derive(Subcommand, Debug)]
pub enum SeriesCommands {
    /// Current and upcoming series
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        search: SearchArgs,
    },

    /// Series fixtures
    #[command(visible_alias = "g")]
    Get {
        series_id: String,

        /// Keep polling and redraw on every update
        #[arg(long, short = 'w')]
        watch: bool,
    },
}

/// Team subcommands
#[derive(Subcommand, Debug)]
pub enum TeamsCommands {
    /// Teams by category
    #[command(visible_alias = "ls")]
    List {
        #[arg(long = "type", short = 't', value_enum, default_value = "all")]
        kind: TeamKind,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Team profile with squad, schedule and results
    #[command(visible_alias = "g")]
    Get { team_id: String },

    /// Team roster
    Players {
        team_id: String,

        /// Only players with this role
        #[arg(long, value_enum)]
        role: Option<PlayerRole>,
    },
}

/// Profile subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show the profile
    Get,

    /// Update the profile
    Set {
        /// Favorite team; pass "" to clear
        #[arg(long)]
        favorite_team: String,
    },
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,

    /// Remove cached responses (keeps the session)
    Clear,

    /// Print the storage directory
    Path,
}

/// Config file subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Save a new backend URL
    SetUrl { url: String },
}
