//! Typed wrappers for each endpoint's response envelope.

use futures::future::try_join_all;
use serde::Deserialize;
use sizewatch_primitives::{ChartPoint, ChunkSeries, Delta, Push};

use crate::ApiClient;
use crate::error::{ApiError, Result};

#[derive(Debug, Deserialize)]
struct PushResponse {
	push: Option<Push>,
}

#[derive(Debug, Deserialize)]
struct DeltaResponse {
	delta: Option<Delta>,
}

#[derive(Debug, Deserialize)]
struct ChunksResponse {
	chunks: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
	data: Vec<ChartPoint>,
}

impl ApiClient {
	/// Fetches the push with the given sha.
	pub async fn push(&self, sha: &str) -> Result<Push> {
		let response: PushResponse = self.get_json("push", &[("sha", sha)]).await?;
		response.push.ok_or(ApiError::Missing("push"))
	}

	/// Fetches the per-chunk size delta from `prev_sha` to `sha`.
	pub async fn delta(&self, prev_sha: &str, sha: &str) -> Result<Delta> {
		let response: DeltaResponse = self.get_json("delta", &[("from", prev_sha), ("to", sha)]).await?;
		response.delta.ok_or(ApiError::Missing("delta"))
	}

	/// Lists the names of all tracked chunks.
	pub async fn chunks(&self) -> Result<Vec<String>> {
		let response: ChunksResponse = self.get_json("chunks", &[]).await?;
		Ok(response.chunks)
	}

	/// Fetches the size history of one chunk, oldest push first.
	pub async fn chart(&self, chunk: &str) -> Result<ChunkSeries> {
		let response: ChartResponse = self.get_json("chart", &[("chunk", chunk)]).await?;
		Ok(ChunkSeries {
			chunk: chunk.to_string(),
			points: response.data,
		})
	}

	/// Fetches the histories of several chunks concurrently, keeping the requested order.
	pub async fn charts(&self, chunks: &[String]) -> Result<Vec<ChunkSeries>> {
		try_join_all(chunks.iter().map(|chunk| self.chart(chunk))).await
	}
}
