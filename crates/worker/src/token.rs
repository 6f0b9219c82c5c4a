use tokio_util::sync::CancellationToken;

/// Cancellation signal scoped to one load generation.
///
/// Cancellation only stops work early. Whether a result may still be committed is
/// decided by the owner comparing [`RunToken::generation`] against its current one.
#[derive(Debug, Clone)]
pub struct RunToken {
	generation: u64,
	cancel: CancellationToken,
}

impl RunToken {
	pub fn new(generation: u64) -> Self {
		Self {
			generation,
			cancel: CancellationToken::new(),
		}
	}

	pub const fn generation(&self) -> u64 {
		self.generation
	}

	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	pub fn cancel(&self) {
		self.cancel.cancel();
	}

	/// Future resolving when cancellation is requested.
	pub async fn cancelled(&self) {
		self.cancel.cancelled().await;
	}
}

/// Holds the token of the single in-flight run for one owner.
#[derive(Debug, Default)]
pub struct RunSlot {
	current: Option<RunToken>,
}

impl RunSlot {
	pub fn new() -> Self {
		Self::default()
	}

	/// Cancels the in-flight run, if any, and installs a token for `generation`.
	pub fn replace(&mut self, generation: u64) -> RunToken {
		self.cancel();
		let token = RunToken::new(generation);
		self.current = Some(token.clone());
		token
	}

	/// Cancels the in-flight run, if any.
	pub fn cancel(&mut self) {
		if let Some(token) = self.current.take() {
			tracing::trace!(generation = token.generation(), "worker.run.cancel");
			token.cancel();
		}
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::*;

	#[test]
	fn replace_cancels_previous_run() {
		let mut slot = RunSlot::new();
		let first = slot.replace(1);
		let second = slot.replace(2);

		assert!(first.is_cancelled());
		assert!(!second.is_cancelled());
		assert_eq!(second.generation(), 2);

		slot.cancel();
		assert!(second.is_cancelled());
		assert!(!slot.replace(3).is_cancelled());
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn cancelled_wakes_waiter() {
		let token = RunToken::new(1);
		let waiter = token.clone();
		let task = tokio::spawn(async move {
			tokio::select! {
				_ = waiter.cancelled() => true,
				_ = tokio::time::sleep(Duration::from_secs(60)) => false,
			}
		});
		tokio::task::yield_now().await;
		token.cancel();
		assert_eq!(task.await.ok(), Some(true));
	}
}
