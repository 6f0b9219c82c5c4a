//! Error types for dashboard API calls.

use sizewatch_primitives::FetchError;
use thiserror::Error;

/// Errors that can occur when calling the dashboard API.
#[derive(Debug, Error)]
pub enum ApiError {
	/// Request could not be sent or its body not read.
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	/// Server answered with a non-success status.
	#[error("API error (status {status}): {message}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Error message from the server, or the raw body.
		message: String,
	},

	/// Response body was not the expected JSON.
	#[error("failed to decode response: {0}")]
	Decode(#[from] serde_json::Error),

	/// Base URL is not an http(s) URL.
	#[error("invalid URL: {0}")]
	InvalidUrl(String),

	/// Response envelope carried no record.
	#[error("no {0} in response")]
	Missing(&'static str),
}

impl ApiError {
	pub fn is_not_found(&self) -> bool {
		match self {
			Self::Status { status, .. } => *status == 404,
			Self::Missing(_) => true,
			_ => false,
		}
	}
}

impl From<ApiError> for FetchError {
	fn from(err: ApiError) -> Self {
		if err.is_not_found() {
			FetchError::NotFound(err.to_string())
		} else {
			FetchError::Unavailable(err.to_string())
		}
	}
}

/// Result type for dashboard API calls.
pub type Result<T> = std::result::Result<T, ApiError>;
