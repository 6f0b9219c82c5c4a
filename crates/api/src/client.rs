use std::time::Duration;

use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ApiError, Result};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the dashboard's JSON endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
	base_url: String,
	http: HttpClient,
}

impl ApiClient {
	/// Creates a client for the server at `base_url`, e.g. `http://localhost:5000`.
	///
	/// # Errors
	///
	/// Returns an error if the URL is not http(s) or the HTTP client cannot be built.
	pub fn new(base_url: impl Into<String>) -> Result<Self> {
		let base_url = base_url.into();
		if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
			return Err(ApiError::InvalidUrl(format!("URL must start with http:// or https://, got: {base_url}")));
		}

		let http = HttpClient::builder().timeout(DEFAULT_TIMEOUT).build()?;
		Ok(Self { base_url, http })
	}

	/// Replaces the per-request timeout.
	///
	/// # Errors
	///
	/// Returns an error if the HTTP client cannot be rebuilt.
	pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
		self.http = HttpClient::builder().timeout(timeout).build()?;
		Ok(self)
	}

	pub(crate) fn url(&self, path: &str) -> String {
		let path = path.strip_prefix('/').unwrap_or(path);
		format!("{}/api/{}", self.base_url.trim_end_matches('/'), path)
	}

	/// GETs `path` with `query` and decodes the JSON body.
	pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
		let url = self.url(path);
		debug!(url = %url, ?query, "api.request");
		let response = self.http.get(&url).query(query).send().await?;
		Self::decode(response).await
	}

	async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
		let status = response.status();
		let body = response.text().await?;
		if !status.is_success() {
			let message = serde_json::from_str::<serde_json::Value>(&body)
				.ok()
				.and_then(|json| json["error"].as_str().or_else(|| json["message"].as_str()).map(str::to_string))
				.unwrap_or(body);
			return Err(ApiError::Status {
				status: status.as_u16(),
				message,
			});
		}
		Ok(serde_json::from_str(&body)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_non_http_urls() {
		assert!(matches!(ApiClient::new("localhost:5000"), Err(ApiError::InvalidUrl(_))));
	}

	#[test]
	fn url_joins_api_prefix() {
		let client = ApiClient::new("http://localhost:5000/").unwrap();
		assert_eq!(client.url("push"), "http://localhost:5000/api/push");
		assert_eq!(client.url("/chunks"), "http://localhost:5000/api/chunks");
	}
}
