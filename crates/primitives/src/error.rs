use thiserror::Error;

/// Failure of a single record lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
	/// The identifier has no corresponding record.
	#[error("not found: {0}")]
	NotFound(String),

	/// Transient transport or server problem.
	#[error("unavailable: {0}")]
	Unavailable(String),
}

impl FetchError {
	/// Returns true for failures that may succeed when requested again.
	pub fn is_transient(&self) -> bool {
		matches!(self, Self::Unavailable(_))
	}
}
