/// Progress of one load run.
///
/// `Done`, `Superseded` and `Failed` are terminal; a terminal run has no further
/// observable effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
	Debouncing,
	FetchingPush,
	CommittedPush,
	FetchingDelta,
	Done,
	/// A newer submission or teardown made this run obsolete.
	Superseded,
	Failed,
}

impl RunPhase {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Debouncing => "debouncing",
			Self::FetchingPush => "fetching_push",
			Self::CommittedPush => "committed_push",
			Self::FetchingDelta => "fetching_delta",
			Self::Done => "done",
			Self::Superseded => "superseded",
			Self::Failed => "failed",
		}
	}

	pub const fn is_terminal(self) -> bool {
		matches!(self, Self::Done | Self::Superseded | Self::Failed)
	}
}
