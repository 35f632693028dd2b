//! CricSphere CLI - live cricket scores, schedules and news in the terminal

use clap::{CommandFactory, Parser};

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod session;
mod storage;

use cli::args::GlobalOptions;
use cli::{
    CacheCommands, Cli, Commands, ConfigCommands, MatchCommands, ProfileCommands, SeriesCommands,
    TeamsCommands,
};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `--debug` forces debug output; otherwise `RUST_LOG` decides, defaulting to warnings
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module("cricsphere", log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Login { username, password } => cli::auth::login(&opts, username, password).await,
        Commands::Register {
            username,
            email,
            password,
            favorite_team,
        } => {
            let input = cli::auth::RegisterInput {
                username,
                email,
                password,
                favorite_team,
            };
            cli::auth::register(&opts, input).await
        }
        Commands::Logout => cli::auth::logout(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("cricsphere version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Live { watch } => cli::live::live(&opts, watch).await,
        Commands::Upcoming => cli::live::upcoming(&opts).await,
        Commands::Recent => cli::live::recent(&opts).await,
        Commands::Match(cmd) => match cmd {
            MatchCommands::Get { match_id, watch } => {
                cli::matches::get(&opts, &match_id, watch).await
            }
            MatchCommands::Scorecard { match_id } => cli::matches::scorecard(&opts, &match_id).await,
            MatchCommands::Commentary { match_id, limit } => {
                cli::matches::commentary(&opts, &match_id, limit).await
            }
            MatchCommands::Squads { match_id } => cli::matches::squads(&opts, &match_id).await,
        },
        Commands::Series(cmd) => match cmd {
            SeriesCommands::List { search } => cli::series::list(&opts, &search).await,
            SeriesCommands::Get { series_id, watch } => {
                cli::series::get(&opts, &series_id, watch).await
            }
        },
        Commands::Rankings {
            category,
            game_format,
            women,
            search,
        } => cli::rankings::run(&opts, category, game_format, women, &search).await,
        Commands::Teams(cmd) => match cmd {
            TeamsCommands::List { kind, search } => cli::teams::list(&opts, kind, &search).await,
            TeamsCommands::Get { team_id } => cli::teams::get(&opts, &team_id).await,
            TeamsCommands::Players { team_id, role } => {
                cli::teams::players(&opts, &team_id, role).await
            }
        },
        Commands::News { search } => cli::news::run(&opts, &search).await,
        Commands::Profile(cmd) => match cmd {
            ProfileCommands::Get => cli::profile::get(&opts).await,
            ProfileCommands::Set { favorite_team } => {
                cli::profile::set(&opts, &favorite_team).await
            }
        },
        Commands::Fetch { path, refresh } => cli::fetch::run(&opts, &path, refresh).await,
        Commands::Cache(cmd) => match cmd {
            CacheCommands::Status => cli::cache::status(&opts),
            CacheCommands::Clear => cli::cache::clear(&opts),
            CacheCommands::Path => cli::cache::path(&opts),
        },
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => cli::config::show(&opts),
            ConfigCommands::Path => cli::config::path(&opts),
            ConfigCommands::SetUrl { url } => cli::config::set_url(&opts, &url),
        },
        Commands::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "cricsphere",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
