//! Request sequencing for push detail loads.
//!
//! # Generations
//!
//! Every [`DetailLoader::submit`] starts a new generation and a run tagged with
//! it. A run commits a result only if, under the state lock, its generation is
//! still the current one and the loader has not been torn down. This check is
//! the only thing standing between a slow response and the visible state, so
//! results of two different keys can never be mixed.
//!
//! # Cancellation
//!
//! Superseding a run also cancels its [`RunToken`]. Each suspension point races
//! the token, so a superseded run drops its pending request instead of waiting
//! for it. Cancellation never replaces the generation check; a response that
//! resolves in the same instant as a newer submission is still discarded.
//!
//! # Runs
//!
//! 1. Wait out the quiet period (skipped when zero).
//! 2. Fetch the push, then commit it.
//! 3. When the key has a predecessor, fetch the delta, then commit it.
//!
//! A fetch failure ends the run and is committed as the state's error under the
//! same generation rule. Nothing is retried; resubmitting the key starts over.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use sizewatch_primitives::{FetchError, PushKey};
use sizewatch_worker::{RunSlot, RunToken};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::state::LoadState;
use crate::{DataSource, LoadError, LoadSnapshot, LoadStage, LoaderConfig, ResultSink, RunPhase};

/// State shared between a loader and its runs.
struct Shared<S> {
	state: LoadState,
	sink: S,
	torn_down: bool,
}

impl<S: ResultSink> Shared<S> {
	fn is_current(&self, generation: u64) -> bool {
		!self.torn_down && self.state.generation() == generation
	}

	/// Applies `apply` and notifies the sink iff `generation` is still current.
	fn commit(&mut self, generation: u64, apply: impl FnOnce(&mut LoadState)) -> bool {
		if !self.is_current(generation) {
			debug!(generation, current = self.state.generation(), torn_down = self.torn_down, "loader.stale");
			return false;
		}
		apply(&mut self.state);
		trace!(generation, "loader.commit");
		self.sink.on_state_change(&self.state.snapshot());
		true
	}
}

/// Loads push details for a changing [`PushKey`], exposing only results of the latest one.
///
/// One loader serves one consumer. Dropping the loader tears it down.
pub struct DetailLoader<D, S> {
	source: Arc<D>,
	shared: Arc<Mutex<Shared<S>>>,
	run: RunSlot,
	key: Option<PushKey>,
	config: LoaderConfig,
}

impl<D, S> fmt::Debug for DetailLoader<D, S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DetailLoader")
			.field("key", &self.key)
			.field("run", &self.run)
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}

impl<D, S> DetailLoader<D, S>
where
	D: DataSource + 'static,
	S: ResultSink,
{
	/// Creates an idle loader. Nothing is fetched until the first [`Self::submit`].
	pub fn new(source: D, sink: S, config: LoaderConfig) -> Self {
		Self {
			source: Arc::new(source),
			shared: Arc::new(Mutex::new(Shared {
				state: LoadState::default(),
				sink,
				torn_down: false,
			})),
			run: RunSlot::new(),
			key: None,
			config,
		}
	}

	/// Supersedes any in-flight run and starts loading `key`.
	///
	/// The sink is notified of the cleared, loading state before this returns.
	/// Returns `None` once the loader has been torn down.
	pub fn submit(&mut self, key: PushKey) -> Option<RunHandle> {
		let generation = {
			let mut shared = self.shared.lock();
			if shared.torn_down {
				debug!(key = %key, "loader.submit.after_teardown");
				return None;
			}
			let generation = shared.state.advance(key.prev_sha().is_some());
			let cleared = shared.state.snapshot();
			shared.sink.on_state_change(&cleared);
			generation
		};
		debug!(generation, key = %key, "loader.submit");

		let token = self.run.replace(generation);
		self.key = Some(key.clone());
		let run = Run {
			source: Arc::clone(&self.source),
			shared: Arc::clone(&self.shared),
			token,
			key,
			quiet_period: self.config.quiet_period,
		};
		let handle = sizewatch_worker::spawn("loader.run", run.execute());
		Some(RunHandle { generation, handle })
	}

	/// Current state as last seen by the sink.
	pub fn snapshot(&self) -> LoadSnapshot {
		self.shared.lock().state.snapshot()
	}

	pub fn generation(&self) -> u64 {
		self.shared.lock().state.generation()
	}
}

impl<D, S> DetailLoader<D, S> {
	/// Permanently stops commits. In-flight runs are cancelled and their results dropped.
	///
	/// Idempotent.
	pub fn teardown(&mut self) {
		{
			let mut shared = self.shared.lock();
			if shared.torn_down {
				return;
			}
			shared.torn_down = true;
		}
		self.run.cancel();
		debug!(key = ?self.key, "loader.teardown");
	}

	pub fn is_torn_down(&self) -> bool {
		self.shared.lock().torn_down
	}

	/// Key of the most recent submission.
	pub fn current_key(&self) -> Option<&PushKey> {
		self.key.as_ref()
	}
}

impl<D, S> Drop for DetailLoader<D, S> {
	fn drop(&mut self) {
		self.teardown();
	}
}

/// Handle to one spawned run.
#[derive(Debug)]
pub struct RunHandle {
	generation: u64,
	handle: JoinHandle<RunPhase>,
}

impl RunHandle {
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Waits for the run to reach a terminal phase.
	///
	/// A run whose task panicked or was aborted reports [`RunPhase::Failed`].
	pub async fn finished(self) -> RunPhase {
		match self.handle.await {
			Ok(phase) => {
				debug_assert!(phase.is_terminal(), "run ended in {phase:?}");
				phase
			}
			Err(err) => {
				warn!(generation = self.generation, error = %err, "loader.run.join_failed");
				RunPhase::Failed
			}
		}
	}
}

/// One pipeline execution for a single generation.
struct Run<D, S> {
	source: Arc<D>,
	shared: Arc<Mutex<Shared<S>>>,
	token: RunToken,
	key: PushKey,
	quiet_period: Duration,
}

impl<D, S> Run<D, S>
where
	D: DataSource + 'static,
	S: ResultSink,
{
	async fn execute(self) -> RunPhase {
		let phase = self.drive().await;
		self.enter(phase);
		phase
	}

	async fn drive(&self) -> RunPhase {
		if !self.quiet_period.is_zero() {
			self.enter(RunPhase::Debouncing);
			tokio::select! {
				biased;
				_ = self.token.cancelled() => return RunPhase::Superseded,
				_ = tokio::time::sleep(self.quiet_period) => {}
			}
		}
		if !self.is_current() {
			return RunPhase::Superseded;
		}

		self.enter(RunPhase::FetchingPush);
		let result = tokio::select! {
			biased;
			_ = self.token.cancelled() => return RunPhase::Superseded,
			result = self.source.fetch_push(self.key.sha()) => result,
		};
		let push = match result {
			Ok(push) => push,
			Err(err) => return self.fail(LoadStage::Push, err),
		};
		if !self.commit(|state| state.set_push(push)) {
			return RunPhase::Superseded;
		}
		self.enter(RunPhase::CommittedPush);

		let Some(prev_sha) = self.key.prev_sha() else {
			return RunPhase::Done;
		};

		self.enter(RunPhase::FetchingDelta);
		let result = tokio::select! {
			biased;
			_ = self.token.cancelled() => return RunPhase::Superseded,
			result = self.source.fetch_delta(prev_sha, self.key.sha()) => result,
		};
		let delta = match result {
			Ok(delta) => delta,
			Err(err) => return self.fail(LoadStage::Delta, err),
		};
		if !self.commit(|state| state.set_delta(delta)) {
			return RunPhase::Superseded;
		}
		RunPhase::Done
	}

	fn enter(&self, phase: RunPhase) {
		trace!(generation = self.token.generation(), phase = phase.as_str(), key = %self.key, "loader.run.phase");
	}

	/// A cancelled token means a newer submission or teardown already happened.
	fn is_current(&self) -> bool {
		!self.token.is_cancelled() && self.shared.lock().is_current(self.token.generation())
	}

	fn commit(&self, apply: impl FnOnce(&mut LoadState)) -> bool {
		self.shared.lock().commit(self.token.generation(), apply)
	}

	fn fail(&self, stage: LoadStage, err: FetchError) -> RunPhase {
		let error = LoadError::new(stage, err);
		debug!(generation = self.token.generation(), %error, "loader.run.failed");
		if self.commit(|state| state.set_error(error)) {
			RunPhase::Failed
		} else {
			RunPhase::Superseded
		}
	}
}
