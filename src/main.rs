mod cli;
mod commands;
mod config;
mod github;
mod report;
mod store;
mod telegram;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use commands::check::Settings;
use telegram::Credentials;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            paths,
            github_token,
            telegram_token,
            telegram_chat,
        } => {
            let settings = Settings {
                config_path: paths.config,
                store_path: paths.store,
                output_path: paths.output,
                github_token,
                telegram: Credentials::from_options(telegram_token, telegram_chat),
            };
            commands::check::run(settings).await
        }
        Commands::Report { paths } => commands::report::run(&paths),
        Commands::Init { force, config } => commands::init::run(force, &config),
        Commands::Version => commands::version::run(),
    }
}
