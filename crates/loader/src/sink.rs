use tokio::sync::watch;

use crate::LoadSnapshot;

/// Receives every generation-consistent change of a loader's state.
///
/// Called with the loader's state lock held: implementations must return quickly
/// and must not call back into the loader.
pub trait ResultSink: Send + 'static {
	fn on_state_change(&self, state: &LoadSnapshot);
}

impl<F> ResultSink for F
where
	F: Fn(&LoadSnapshot) + Send + 'static,
{
	fn on_state_change(&self, state: &LoadSnapshot) {
		self(state)
	}
}

/// Publishes the latest state to any number of [`watch::Receiver`]s.
///
/// Further observers clone the receiver returned by [`WatchSink::channel`].
#[derive(Debug)]
pub struct WatchSink {
	tx: watch::Sender<LoadSnapshot>,
}

impl WatchSink {
	/// Creates a sink and its first subscriber.
	pub fn channel() -> (Self, watch::Receiver<LoadSnapshot>) {
		let (tx, rx) = watch::channel(LoadSnapshot::default());
		(Self { tx }, rx)
	}
}

impl ResultSink for WatchSink {
	fn on_state_change(&self, state: &LoadSnapshot) {
		self.tx.send_replace(state.clone());
	}
}
