//! Franklin CLI entry point.

use anyhow::Result;
use clap::Parser;
use franklin::cli::{commands, Cli, Commands};
use franklin::config::Settings;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may already be set
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    // Load configuration
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&Settings::expand_path(path)))?,
        None => Settings::load()?,
    };
    settings.apply_env(|key| std::env::var(key).ok())?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("franklin={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env loaded: {}", e),
    }

    // Execute command
    match cli.command {
        None => {
            commands::run_serve(None, None, settings).await?;
        }

        Some(Commands::Serve { host, port }) => {
            commands::run_serve(host, port, settings).await?;
        }

        Some(Commands::Swml) => {
            commands::run_swml(settings)?;
        }

        Some(Commands::Prompt) => {
            commands::run_prompt(settings)?;
        }

        Some(Commands::Exec { function, args }) => {
            commands::run_exec(&function, &args, settings).await?;
        }

        Some(Commands::Config { action }) => {
            commands::run_config(&action, settings)?;
        }
    }

    Ok(())
}
