use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sizewatch_primitives::SizeKind;

#[derive(Parser, Debug)]
#[command(name = "sizewatch")]
#[command(about = "Build-size history and per-push size deltas")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Config file (defaults to <config dir>/sizewatch/config.toml)
	#[arg(long, short = 'c', value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Dashboard server, overriding the config file
	#[arg(long, value_name = "URL")]
	pub base_url: Option<String>,

	/// Delay before hovered pushes are fetched, overriding the config file
	#[arg(long, value_name = "MS")]
	pub quiet_period_ms: Option<u64>,

	/// Verbose logging
	#[arg(long, short = 'v')]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Show one push and its size delta against a previous push
	Push {
		/// Push to show
		sha: String,
		/// Push to compare against
		prev_sha: Option<String>,
		/// Size measurement for the delta
		#[arg(long, short = 's', default_value_t = SizeKind::default())]
		size: SizeKind,
	},
	/// List tracked chunks
	Chunks,
	/// Print chart series for the selected chunks
	Chart {
		/// Chunks to include (repeatable, defaults to build)
		#[arg(long = "chunk", value_name = "NAME")]
		chunks: Vec<String>,
		/// Size measurement to chart
		#[arg(long, short = 's', default_value_t = SizeKind::default())]
		size: SizeKind,
	},
	/// Hover across every push of a chunk's chart and show where it lands
	Sweep {
		/// Chunk whose history is swept
		#[arg(long, default_value = "build")]
		chunk: String,
		/// Size measurement for the delta
		#[arg(long, short = 's', default_value_t = SizeKind::default())]
		size: SizeKind,
		/// Delay between hovers
		#[arg(long, default_value_t = 50, value_name = "MS")]
		interval_ms: u64,
	},
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn cli_definition_is_valid() {
		Cli::command().debug_assert();
	}

	#[test]
	fn parses_push_with_overrides() {
		let cli = Cli::parse_from(["sizewatch", "--quiet-period-ms", "0", "push", "abc", "def", "-s", "stat_size"]);
		assert_eq!(cli.quiet_period_ms, Some(0));
		match cli.command {
			Command::Push { sha, prev_sha, size } => {
				assert_eq!(sha, "abc");
				assert_eq!(prev_sha.as_deref(), Some("def"));
				assert_eq!(size, SizeKind::StatSize);
			}
			other => panic!("unexpected command {other:?}"),
		}
	}

	#[test]
	fn chart_collects_repeated_chunks() {
		let cli = Cli::parse_from(["sizewatch", "chart", "--chunk", "build", "--chunk", "vendor"]);
		match cli.command {
			Command::Chart { chunks, size } => {
				assert_eq!(chunks, ["build", "vendor"]);
				assert_eq!(size, SizeKind::GzipSize);
			}
			other => panic!("unexpected command {other:?}"),
		}
	}
}
