use std::fmt;

use sizewatch_primitives::FetchError;
use thiserror::Error;

/// Lookup step that produced a [`LoadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
	Push,
	Delta,
}

impl fmt::Display for LoadStage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Push => "push",
			Self::Delta => "delta",
		})
	}
}

/// Coarse classification of a load failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// The requested record does not exist.
	NotFound,
	/// The data source could not be reached or answered badly.
	Unavailable,
}

/// Failure committed to the sink for the generation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} lookup failed: {source}")]
pub struct LoadError {
	pub stage: LoadStage,
	#[source]
	pub source: FetchError,
}

impl LoadError {
	pub fn new(stage: LoadStage, source: FetchError) -> Self {
		Self { stage, source }
	}

	pub fn kind(&self) -> ErrorKind {
		match self.source {
			FetchError::NotFound(_) => ErrorKind::NotFound,
			FetchError::Unavailable(_) => ErrorKind::Unavailable,
		}
	}
}
