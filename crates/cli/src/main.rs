//! `sizewatch` command-line frontend.

mod cli;
mod commands;
mod config;
mod logging;

use clap::Parser;
use cli::Cli;
use config::Config;
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	logging::init(cli.verbose)?;

	let config = Config::load(cli.config.as_deref())?.with_overrides(&cli);
	debug!(base_url = %config.base_url, quiet_period_ms = config.quiet_period_ms, "config.loaded");

	commands::run(cli.command, &config).await
}
