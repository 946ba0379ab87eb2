use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "relwatch")]
#[command(version)]
#[command(about = "Track the latest releases of GitHub projects")]
#[command(long_about = "Relwatch polls a configured list of GitHub repositories for new \
releases, remembers the last release it saw for each project, and on a change regenerates \
a Markdown summary and optionally sends a Telegram notification.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check all tracked projects for new releases
    Check {
        #[command(flatten)]
        paths: PathArgs,

        /// GitHub API token (raises the unauthenticated rate limit)
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        github_token: Option<String>,

        /// Telegram bot token for notifications
        #[arg(long, env = "TG_BOT_TOKEN", hide_env_values = true)]
        telegram_token: Option<String>,

        /// Telegram chat id to notify
        #[arg(long, env = "TG_CHAT_ID")]
        telegram_chat: Option<String>,
    },

    /// Regenerate the summary file from the stored releases without fetching
    Report {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Write a starter config.yaml
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,

        /// Path to write the config file to
        #[arg(short, long, default_value = "config.yaml")]
        config: String,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
pub struct PathArgs {
    /// Path to the tracked-projects config file
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    /// Path to the persisted release store
    #[arg(short, long, default_value = "releases.json")]
    pub store: String,

    /// Path to the generated summary file
    #[arg(short, long, default_value = "RELEASES_SUMMARY.md")]
    pub output: String,
}
