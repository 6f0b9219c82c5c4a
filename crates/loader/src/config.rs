use std::time::Duration;

/// Static configuration of one [`DetailLoader`](crate::DetailLoader).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderConfig {
	/// Delay between a submission and the earliest fetch it may issue.
	///
	/// Zero issues fetches immediately on every submission.
	pub quiet_period: Duration,
}

impl LoaderConfig {
	pub fn with_quiet_period_ms(millis: u64) -> Self {
		Self {
			quiet_period: Duration::from_millis(millis),
		}
	}
}
