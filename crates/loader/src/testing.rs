//! Test doubles for loader consumers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use sizewatch_primitives::{ChunkDelta, Delta, FetchError, Push, SizeChange};
use tokio::time::Instant;

use crate::{DataSource, LoadSnapshot, ResultSink};

/// One lookup observed by a [`ScriptedSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
	Push(String),
	Delta { prev_sha: String, sha: String },
}

#[derive(Debug, Default)]
struct Script {
	latency: Duration,
	push_latency: HashMap<String, Duration>,
	delta_latency: HashMap<String, Duration>,
	push_errors: HashMap<String, FetchError>,
	delta_errors: HashMap<String, FetchError>,
	calls: Vec<(Instant, Call)>,
	completed: Vec<Call>,
}

/// Data source answering every lookup after a scripted delay.
///
/// Pushes are synthesized from their sha; deltas carry one `build` chunk whose
/// name encodes the compared range. Clones share the same script and call log.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
	script: Arc<Mutex<Script>>,
}

impl ScriptedSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Delay applied to every lookup without a more specific one.
	pub fn with_latency(self, latency: Duration) -> Self {
		self.script.lock().latency = latency;
		self
	}

	pub fn push_latency(&self, sha: &str, latency: Duration) {
		self.script.lock().push_latency.insert(sha.to_string(), latency);
	}

	/// Delay for deltas ending at `sha`.
	pub fn delta_latency(&self, sha: &str, latency: Duration) {
		self.script.lock().delta_latency.insert(sha.to_string(), latency);
	}

	pub fn fail_push(&self, sha: &str, err: FetchError) {
		self.script.lock().push_errors.insert(sha.to_string(), err);
	}

	/// Makes deltas ending at `sha` fail.
	pub fn fail_delta(&self, sha: &str, err: FetchError) {
		self.script.lock().delta_errors.insert(sha.to_string(), err);
	}

	/// Lookups issued so far, in order.
	pub fn calls(&self) -> Vec<Call> {
		self.script.lock().calls.iter().map(|(_, call)| call.clone()).collect()
	}

	/// Lookups issued so far with the instant each was issued.
	pub fn timed_calls(&self) -> Vec<(Instant, Call)> {
		self.script.lock().calls.clone()
	}

	/// Lookups that ran to completion rather than being dropped.
	pub fn completed(&self) -> Vec<Call> {
		self.script.lock().completed.clone()
	}

	fn begin(&self, call: Call, latency: Option<Duration>) -> Duration {
		let mut script = self.script.lock();
		let latency = latency.unwrap_or(script.latency);
		script.calls.push((Instant::now(), call));
		latency
	}

	fn finish(&self, call: Call) {
		self.script.lock().completed.push(call);
	}
}

/// Push record the scripted source returns for `sha`.
pub fn push_for(sha: &str) -> Push {
	Push {
		sha: sha.to_string(),
		author: format!("author-{sha}"),
		created_at: "2018-06-01T12:00:00Z".to_string(),
		message: format!("Commit {sha}"),
	}
}

/// Delta record the scripted source returns for `prev_sha..sha`.
pub fn delta_for(prev_sha: &str, sha: &str) -> Delta {
	Delta {
		chunks: vec![ChunkDelta {
			chunk: format!("{prev_sha}..{sha}"),
			stat_size: SizeChange { before: 100, after: 120 },
			parsed_size: SizeChange { before: 60, after: 70 },
			gzip_size: SizeChange { before: 20, after: 22 },
		}],
	}
}

#[async_trait]
impl DataSource for ScriptedSource {
	async fn fetch_push(&self, sha: &str) -> Result<Push, FetchError> {
		let call = Call::Push(sha.to_string());
		let latency = self.script.lock().push_latency.get(sha).copied();
		let latency = self.begin(call.clone(), latency);
		tokio::time::sleep(latency).await;
		self.finish(call);
		let error = self.script.lock().push_errors.get(sha).cloned();
		match error {
			Some(err) => Err(err),
			None => Ok(push_for(sha)),
		}
	}

	async fn fetch_delta(&self, prev_sha: &str, sha: &str) -> Result<Delta, FetchError> {
		let call = Call::Delta {
			prev_sha: prev_sha.to_string(),
			sha: sha.to_string(),
		};
		let latency = self.script.lock().delta_latency.get(sha).copied();
		let latency = self.begin(call.clone(), latency);
		tokio::time::sleep(latency).await;
		self.finish(call);
		let error = self.script.lock().delta_errors.get(sha).cloned();
		match error {
			Some(err) => Err(err),
			None => Ok(delta_for(prev_sha, sha)),
		}
	}
}

/// Sink that keeps every snapshot it is handed.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
	seen: Arc<Mutex<Vec<LoadSnapshot>>>,
}

impl RecordingSink {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn snapshots(&self) -> Vec<LoadSnapshot> {
		self.seen.lock().clone()
	}

	pub fn last(&self) -> Option<LoadSnapshot> {
		self.seen.lock().last().cloned()
	}

	pub fn len(&self) -> usize {
		self.seen.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.seen.lock().is_empty()
	}
}

impl ResultSink for RecordingSink {
	fn on_state_change(&self, state: &LoadSnapshot) {
		self.seen.lock().push(state.clone());
	}
}
