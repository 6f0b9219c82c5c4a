use async_trait::async_trait;
use sizewatch_loader::DataSource;
use sizewatch_primitives::{Delta, FetchError, Push};

use crate::ApiClient;

#[async_trait]
impl DataSource for ApiClient {
	async fn fetch_push(&self, sha: &str) -> Result<Push, FetchError> {
		Ok(self.push(sha).await?)
	}

	async fn fetch_delta(&self, prev_sha: &str, sha: &str) -> Result<Delta, FetchError> {
		Ok(self.delta(prev_sha, sha).await?)
	}
}
