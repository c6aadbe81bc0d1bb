//! CLI module for Franklin.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Franklin - the web search bot
///
/// A voice agent that answers questions with live web search. Without a
/// subcommand it serves the agent over HTTP.
#[derive(Parser, Debug)]
#[command(name = "franklin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the agent over HTTP (default)
    Serve {
        /// Host to bind to
        #[arg(long, env = "FRANKLIN_HOST")]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the SWML document the agent serves
    Swml,

    /// Print the agent prompt as Markdown
    Prompt,

    /// Run an agent function locally, as the platform would
    Exec {
        /// Function name (e.g. "web_search")
        function: String,

        /// Function arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
