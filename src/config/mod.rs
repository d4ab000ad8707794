mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "sparkify.db";
pub const DEFAULT_SONG_DATA_DIR: &str = "data/song_data";
pub const DEFAULT_LOG_DATA_DIR: &str = "data/log_data";

/// Settings coming from the command line or its environment variables.
/// Values in the TOML file win over these; anything set in neither place
/// falls back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub song_data_dir: Option<PathBuf>,
    pub log_data_dir: Option<PathBuf>,
    pub skip_malformed_files: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub song_data_dir: PathBuf,
    pub log_data_dir: PathBuf,
    pub skip_malformed_files: bool,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or_else(|| cli.db_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));
        if db_path.is_dir() {
            bail!("db_path is a directory: {:?}", db_path);
        }

        let song_data_dir = file
            .song_data_dir
            .map(PathBuf::from)
            .or_else(|| cli.song_data_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SONG_DATA_DIR));

        let log_data_dir = file
            .log_data_dir
            .map(PathBuf::from)
            .or_else(|| cli.log_data_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DATA_DIR));

        let skip_malformed_files = file
            .skip_malformed_files
            .unwrap_or(cli.skip_malformed_files);

        Ok(AppConfig {
            db_path,
            song_data_dir,
            log_data_dir,
            skip_malformed_files,
        })
    }
}
