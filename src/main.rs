use anyhow::Result;
use clap::Parser;
use sparkify_etl::cli::{init_tracing, parse_path, CommonArgs};
use sparkify_etl::config::CliConfig;
use sparkify_etl::loader::{LoadOptions, RecordLoader};
use sparkify_etl::warehouse::WarehouseStore;
use std::path::PathBuf;
use tracing::{info, warn};

/// Load song and event log files into the warehouse.
#[derive(Parser, Debug)]
#[command(name = "etl")]
struct CliArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Root directory of the song JSON files.
    #[clap(long, env = "SPARKIFY_SONG_DATA", value_parser = parse_path)]
    song_data: Option<PathBuf>,

    /// Root directory of the event log JSON files.
    #[clap(long, env = "SPARKIFY_LOG_DATA", value_parser = parse_path)]
    log_data: Option<PathBuf>,

    /// Skip files that cannot be parsed instead of aborting the load.
    #[clap(long, default_value_t = false)]
    skip_malformed_files: bool,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    init_tracing()?;

    let config = cli_args.common.resolve(CliConfig {
        song_data_dir: cli_args.song_data,
        log_data_dir: cli_args.log_data,
        skip_malformed_files: cli_args.skip_malformed_files,
        ..CliConfig::default()
    })?;

    info!("Opening warehouse database at {:?}...", config.db_path);
    let mut store = WarehouseStore::open(&config.db_path)?;

    let summary = RecordLoader::new(
        &mut store,
        LoadOptions {
            skip_malformed_files: config.skip_malformed_files,
        },
    )
    .run(&config.song_data_dir, &config.log_data_dir)?;

    for path in &summary.files_skipped {
        warn!("Skipped: {}", path.display());
    }

    let counts = store.counts()?;
    info!("Warehouse contains:");
    info!("  {} songs", counts.songs);
    info!("  {} artists", counts.artists);
    info!("  {} users", counts.users);
    info!("  {} time rows", counts.time);
    info!("  {} songplays", counts.songplays);
    Ok(())
}
