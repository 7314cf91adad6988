//! Share - score-weighted pool splitting in the terminal
//!
//! Splits a total pool among named participants:
//! - `allocated` participants share `total - reserved - manual` by score
//! - `reserved` participants share the reserved pool by score
//! - `manual` participants keep an estimate entered by hand

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use share_engine::ShareSession;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

use config::CliConfig;

/// Share CLI application
#[derive(Parser)]
#[command(name = "share")]
#[command(about = "Share - split a money pool by score", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "SHARE_CONFIG")]
    config: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long)]
    output: Option<output::OutputFormat>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Interactive session reading commands from stdin (default)
    Repl,

    /// Apply a JSON action script and print the result
    Run {
        /// Path to a JSON array of actions
        script: PathBuf,
    },

    /// Show configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    // Load config
    let config = CliConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let format = cli.output.or(config.output).unwrap_or_default();

    let mut session =
        ShareSession::with_config(config.session.clone()).context("starting session")?;

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            let stdin = std::io::stdin();
            commands::repl::execute(&mut session, format, stdin.lock())?;
        }
        Commands::Run { script } => {
            let refused = commands::run::execute(&mut session, &script, format)
                .with_context(|| format!("running script {}", script.display()))?;
            if refused > 0 {
                output::print_error(&format!("{} action(s) refused", refused));
            }
        }
        Commands::Config => {
            output::print_single(&config, format)?;
        }
    }
    Ok(())
}
