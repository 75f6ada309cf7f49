//! Config command - locate, show or create config.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use recall_core::EngineConfig;
use recall_core::config;

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print where the config file lives
    Path,

    /// Print the effective configuration as TOML
    Show,

    /// Write a config file with every default filled in
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Execute the config command
pub fn execute(args: ConfigArgs, explicit: Option<&Path>) -> Result<()> {
    let path = resolve_path(explicit)?;
    match args.action {
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Show => {
            let config = effective_config(&path)?;
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Init { force } => {
            init(&path, force)?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => config::default_path().context("could not determine a config directory"),
    }
}

/// Missing files mean defaults; broken ones are reported
fn effective_config(path: &Path) -> Result<EngineConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, showing defaults");
        return Ok(EngineConfig::default());
    }
    config::load_from(path).with_context(|| format!("loading config from {}", path.display()))
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    config::save_to(path, &EngineConfig::default())?;
    tracing::info!(path = %path.display(), "config written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        init(&path, false).unwrap();
        assert_eq!(effective_config(&path).unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[game]\nalphabet_size = 3\n").unwrap();

        assert!(init(&path, false).is_err());
        assert_eq!(effective_config(&path).unwrap().game.alphabet_size, 3);

        init(&path, true).unwrap();
        assert_eq!(effective_config(&path).unwrap().game.alphabet_size, 4);
    }

    #[test]
    fn test_missing_file_shows_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = effective_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scoring]\nlives = 0\n").unwrap();
        assert!(effective_config(&path).is_err());
    }
}
