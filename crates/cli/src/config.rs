//! TOML configuration for the command-line frontend.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use sizewatch_loader::LoaderConfig;
use thiserror::Error;

use crate::cli::Cli;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML or an unexpected value.
	#[error("invalid config {path}: {error}")]
	Parse {
		/// Path to the file that failed to parse.
		path: PathBuf,
		/// The underlying TOML error.
		error: toml::de::Error,
	},

	/// A value parsed but is out of range.
	#[error("invalid config {path}: {message}")]
	Invalid {
		/// Path to the offending file.
		path: PathBuf,
		/// What is wrong with the value.
		message: String,
	},
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Dashboard server root, without the `/api` suffix.
	pub base_url: String,
	/// Hover debounce for detail loads.
	pub quiet_period_ms: u64,
	/// Per-request timeout, at least one second.
	pub request_timeout_secs: u64,
	/// GitHub `owner/name` for commit links.
	pub repository: Option<String>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			base_url: "http://localhost:5000".to_string(),
			quiet_period_ms: 500,
			request_timeout_secs: 30,
			repository: None,
		}
	}
}

impl Config {
	/// Default location, `<config dir>/sizewatch/config.toml`.
	pub fn default_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join("sizewatch").join("config.toml"))
	}

	/// Loads `path`, or the default location when `None`.
	///
	/// A missing file at the default location yields defaults; an explicitly
	/// given path must exist.
	pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
		match path {
			Some(path) => Self::read(path),
			None => match Self::default_path() {
				Some(path) if path.exists() => Self::read(&path),
				_ => Ok(Self::default()),
			},
		}
	}

	fn read(path: &Path) -> Result<Self, ConfigError> {
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let config = Self::parse(&text).map_err(|error| ConfigError::Parse {
			path: path.to_path_buf(),
			error,
		})?;
		config.validate().map_err(|message| ConfigError::Invalid {
			path: path.to_path_buf(),
			message,
		})?;
		Ok(config)
	}

	fn validate(&self) -> Result<(), String> {
		if self.request_timeout_secs == 0 {
			return Err("request_timeout_secs must be at least 1".to_string());
		}
		Ok(())
	}

	pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
		toml::from_str(text)
	}

	/// Applies command-line overrides.
	pub fn with_overrides(mut self, cli: &Cli) -> Self {
		if let Some(base_url) = &cli.base_url {
			self.base_url = base_url.clone();
		}
		if let Some(quiet_period_ms) = cli.quiet_period_ms {
			self.quiet_period_ms = quiet_period_ms;
		}
		self
	}

	pub fn loader(&self) -> LoaderConfig {
		LoaderConfig::with_quiet_period_ms(self.quiet_period_ms)
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout_secs)
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use clap::Parser;
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn partial_file_keeps_defaults() {
		let config = Config::parse("base_url = \"https://sizes.example.com\"\n").unwrap();
		assert_eq!(
			config,
			Config {
				base_url: "https://sizes.example.com".to_string(),
				..Config::default()
			}
		);
	}

	#[test]
	fn unknown_keys_are_rejected() {
		assert!(Config::parse("quiet_period = 5\n").is_err());
	}

	#[test]
	fn load_reads_explicit_path() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "quiet_period_ms = 0\nrepository = \"Automattic/wp-calypso\"").unwrap();

		let config = Config::load(Some(file.path())).unwrap();
		assert_eq!(config.quiet_period_ms, 0);
		assert_eq!(config.repository.as_deref(), Some("Automattic/wp-calypso"));
		assert_eq!(config.loader(), LoaderConfig::default());
	}

	#[test]
	fn zero_request_timeout_is_rejected() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "request_timeout_secs = 0").unwrap();

		match Config::load(Some(file.path())) {
			Err(ConfigError::Invalid { message, .. }) => assert_eq!(message, "request_timeout_secs must be at least 1"),
			other => panic!("expected invalid config, got {other:?}"),
		}
	}

	#[test]
	fn load_reports_missing_explicit_path() {
		let dir = tempfile::tempdir().unwrap();
		let missing = dir.path().join("nope.toml");
		assert!(matches!(Config::load(Some(&missing)), Err(ConfigError::Io { .. })));
	}

	#[test]
	fn cli_flags_override_file() {
		let cli = Cli::parse_from(["sizewatch", "--base-url", "http://ci:8080", "--quiet-period-ms", "100", "chunks"]);
		let config = Config::default().with_overrides(&cli);
		assert_eq!(config.base_url, "http://ci:8080");
		assert_eq!(config.loader().quiet_period, Duration::from_millis(100));
		assert_eq!(config.request_timeout(), Duration::from_secs(30));
	}
}
