use std::sync::Arc;

use async_trait::async_trait;
use sizewatch_primitives::{Delta, FetchError, Push};

/// Remote lookups a [`DetailLoader`](crate::DetailLoader) draws its records from.
///
/// Futures returned by these methods may be dropped before completion when the
/// run that awaits them is superseded; implementations should treat a drop as an
/// abort of the underlying request.
#[async_trait]
pub trait DataSource: Send + Sync {
	/// Looks up the push identified by `sha`.
	async fn fetch_push(&self, sha: &str) -> Result<Push, FetchError>;

	/// Looks up the size delta from `prev_sha` to `sha`.
	async fn fetch_delta(&self, prev_sha: &str, sha: &str) -> Result<Delta, FetchError>;
}

#[async_trait]
impl<T> DataSource for Arc<T>
where
	T: DataSource + ?Sized,
{
	async fn fetch_push(&self, sha: &str) -> Result<Push, FetchError> {
		(**self).fetch_push(sha).await
	}

	async fn fetch_delta(&self, prev_sha: &str, sha: &str) -> Result<Delta, FetchError> {
		(**self).fetch_delta(prev_sha, sha).await
	}
}
