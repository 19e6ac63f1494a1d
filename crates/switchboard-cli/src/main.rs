//! Switchboard CLI
//!
//! Ask about the weather or your documents; the query is routed to the
//! right handler by inferred intent.

use clap::Parser;
use switchboard_core::{Config, Session};

mod app;
mod commands;

use app::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(switchboard_core::error::exit_codes::INVALID_INPUT);
        }
    };

    let result = match cli.command {
        Commands::Config => commands::config::run(&config),
        command => {
            let session = match Session::new(&config) {
                Ok(session) => session,
                Err(e) => {
                    eprintln!("Failed to initialize session: {}", e);
                    std::process::exit(e.exit_code());
                }
            };
            match command {
                Commands::Ask(args) => commands::ask::run(args, &session).await,
                Commands::Ingest(args) => commands::ingest::run(args, &session).await,
                Commands::Config => unreachable!(),
            }
        }
    };

    if let Err(e) = result {
        std::process::exit(e.exit_code());
    }
}
