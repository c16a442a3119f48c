//! SprintDesk CLI: the `sprintdesk` command.

mod cli;
mod commands;
mod config;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SPRINTDESK_LOG";

fn main() {
    init_logging();
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Login {
            username,
            password,
            json,
        } => commands::auth::run_login(username, password, json, config),

        Commands::Logout => commands::auth::run_logout(config),

        Commands::Whoami { json } => commands::auth::run_whoami(json, config),

        Commands::Register {
            username,
            email,
            firstname,
            lastname,
            title,
            password,
            json,
        } => commands::auth::run_register(
            commands::auth::RegisterArgs {
                username,
                email,
                firstname,
                lastname,
                title,
                password,
                json,
            },
            config,
        ),

        Commands::Issue { command } => commands::issue::run(command, config),

        Commands::Project { command } => commands::project::run(command, config),

        Commands::User { command } => commands::user::run(command, config),

        Commands::Label { command } => commands::label::run(command, config),

        Commands::Dashboard { json } => commands::dashboard::run(json, config),

        Commands::Config { json } => commands::config::run(json, config),
    }
}

/// Diagnostics go to stderr so `--json` stdout stays parseable.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}
