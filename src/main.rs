use anyhow::Result;
use clap::{Parser, Subcommand};
use linkcheck::commands::{check, serve, token, user};
use linkcheck::fs::Plan;
use linkcheck::logging;
use linkcheck::validation::clap_token_validator;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "linkcheck")]
#[command(about = "Telegram bot for batch endpoint health checks", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot (long-polls Telegram until Ctrl-C)
    Serve,

    /// Check up to 15 targets from a file or stdin and print the report
    Check {
        /// File with one `host|port|/path|expected_status` target per line
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// API token to send to the check service
        #[arg(short, long, value_parser = clap_token_validator, conflicts_with = "user")]
        token: Option<String>,

        /// Use the token saved for this Telegram user id
        #[arg(short, long, allow_hyphen_values = true)]
        user: Option<i64>,
    },

    /// Manage saved API tokens
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },

    /// Manage registered users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
enum TokenCommands {
    /// Save (or replace) a user's token
    Set {
        #[arg(allow_hyphen_values = true)]
        user_id: i64,

        #[arg(value_parser = clap_token_validator)]
        token: String,
    },

    /// Show a user's token, masked
    Show {
        #[arg(allow_hyphen_values = true)]
        user_id: i64,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Register a user, or update the plan of an existing one
    Add {
        #[arg(allow_hyphen_values = true)]
        user_id: i64,

        /// Plan: free or premium
        #[arg(short, long, default_value = "free")]
        plan: Plan,
    },

    /// Ban a user
    Ban {
        #[arg(allow_hyphen_values = true)]
        user_id: i64,
    },

    /// Lift a ban
    Unban {
        #[arg(allow_hyphen_values = true)]
        user_id: i64,
    },

    /// Change a user's plan
    Plan {
        #[arg(allow_hyphen_values = true)]
        user_id: i64,

        /// free or premium
        plan: Plan,
    },

    /// List all users
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Serve => serve::execute(config),
        Commands::Check { file, token, user } => {
            check::execute(config, file.as_deref(), token, user)
        }
        Commands::Token { command } => match command {
            TokenCommands::Set { user_id, token } => token::set(config, user_id, token),
            TokenCommands::Show { user_id } => token::show(config, user_id),
        },
        Commands::User { command } => match command {
            UserCommands::Add { user_id, plan } => user::add(config, user_id, plan),
            UserCommands::Ban { user_id } => user::set_banned(config, user_id, true),
            UserCommands::Unban { user_id } => user::set_banned(config, user_id, false),
            UserCommands::Plan { user_id, plan } => user::set_plan(config, user_id, plan),
            UserCommands::List => user::list(config),
        },
    }
}
