//! Recall CLI - play, simulate and tune the sequence memory game
//!
//! # Commands
//!
//! - `recall play` - Play in the terminal (tokens shown in real time)
//! - `recall simulate` - Headless autoplayer for tuning difficulty curves
//! - `recall plan` - Print the difficulty table
//! - `recall config` - Show, locate or create the config file
//!
//! # Config (config.toml)
//!
//! ```toml
//! [game]
//! alphabet_size = 4
//!
//! [planner]
//! base_length = 2
//! growth_rate = 1.0
//! max_length = 12
//!
//! [scoring]
//! token_reward = 10
//! round_bonus = 50
//! lives = 1
//! ```

mod config_cmd;
mod feedback;
mod plan;
mod play;
mod report;
mod simulate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recall_core::EngineConfig;

/// Recall - sequence memory game
#[derive(Parser)]
#[command(name = "recall")]
#[command(about = "Sequence memory game engine front-end")]
#[command(version)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play in the terminal
    Play(play::PlayArgs),

    /// Run headless autoplayed sessions
    Simulate(simulate::SimulateArgs),

    /// Print the difficulty table
    Plan(plan::PlanArgs),

    /// Manage the config file
    Config(config_cmd::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Config(args) => config_cmd::execute(args, cli.config.as_deref()),
        Commands::Play(args) => play::execute(args, load_config(cli.config)?),
        Commands::Simulate(args) => simulate::execute(args, load_config(cli.config)?),
        Commands::Plan(args) => plan::execute(args, load_config(cli.config)?),
    }
}

/// Explicit paths must load; the default location falls back to defaults
fn load_config(path: Option<PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(path) => recall_core::config::load_from(&path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(recall_core::config::load()),
    }
}
