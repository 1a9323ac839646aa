use clap::Parser;
use tracing::debug;

use savings_cli::app;
use savings_cli::cli::Cli;
use savings_cli::config::AppConfig;
use savings_cli::logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    logging::init(level, config.logging.file.as_deref())?;
    debug!(backend = %config.constants.backend, "configuration loaded");

    let output = app::execute(&cli, &config)?;
    print!("{output}");

    Ok(())
}
