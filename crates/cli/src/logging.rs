use tracing_subscriber::EnvFilter;

/// Installs the global stderr subscriber.
///
/// `RUST_LOG` wins over the verbosity flag when set.
pub fn init(verbose: bool) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
	let default_level = if verbose { "debug" } else { "info" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	let subscriber = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.finish();

	tracing::subscriber::set_global_default(subscriber)
}
