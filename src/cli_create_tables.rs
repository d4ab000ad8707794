use anyhow::Result;
use clap::Parser;
use sparkify_etl::cli::{init_tracing, CommonArgs};
use sparkify_etl::config::CliConfig;
use sparkify_etl::warehouse::SchemaManager;
use tracing::{info, warn};

/// Drop the warehouse database and recreate its empty tables.
#[derive(Parser, Debug)]
#[command(name = "create-tables")]
struct CliArgs {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    init_tracing()?;

    let config = cli_args.common.resolve(CliConfig::default())?;
    let manager = SchemaManager::new(&config.db_path);

    if config.db_path.exists() {
        warn!(
            "Dropping existing warehouse {:?}, all loaded data will be lost",
            config.db_path
        );
    }
    manager.reset()?;
    manager.validate()?;

    info!("Warehouse {:?} is ready", config.db_path);
    Ok(())
}
