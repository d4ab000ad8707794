//! Pieces shared by the `etl` and `create-tables` binaries.

use crate::config::{AppConfig, CliConfig, FileConfig};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to the SQLite warehouse database file.
    #[clap(long, env = "SPARKIFY_DB_PATH", value_parser = parse_path)]
    pub db_path: Option<PathBuf>,

    /// Path to a TOML config file. Its values override flags and environment.
    #[clap(long, env = "SPARKIFY_CONFIG", value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

impl CommonArgs {
    /// Merge the optional config file over the command-line settings.
    pub fn resolve(&self, cli: CliConfig) -> Result<AppConfig> {
        let cli = CliConfig {
            db_path: self.db_path.clone(),
            ..cli
        };
        let file_config = match &self.config {
            Some(path) => {
                info!("Reading config file {:?}", path);
                Some(FileConfig::load(path)?)
            }
            None => None,
        };
        AppConfig::resolve(&cli, file_config)
    }
}

/// Log to stdout, filtered by `LOG_LEVEL` (INFO when unset).
pub fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")
}
