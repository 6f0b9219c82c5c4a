use sizewatch_loader::{DataSource, DetailLoader, LoaderConfig, ResultSink, RunHandle};
use sizewatch_primitives::PushKey;
use tracing::trace;

use crate::ChartModel;

/// Size chart whose hovered push is loaded into a detail panel.
#[derive(Debug)]
pub struct Dashboard<D, S> {
	chart: ChartModel,
	details: DetailLoader<D, S>,
}

impl<D, S> Dashboard<D, S>
where
	D: DataSource + 'static,
	S: ResultSink,
{
	pub fn new(source: D, sink: S, config: LoaderConfig) -> Self {
		Self {
			chart: ChartModel::new(),
			details: DetailLoader::new(source, sink, config),
		}
	}

	pub fn chart(&self) -> &ChartModel {
		&self.chart
	}

	pub fn chart_mut(&mut self) -> &mut ChartModel {
		&mut self.chart
	}

	pub fn details(&self) -> &DetailLoader<D, S> {
		&self.details
	}

	/// Pointer moved over the push at `index`.
	///
	/// Returns the started run, or `None` when the index is out of range or the
	/// same push is already shown.
	pub fn hover(&mut self, index: usize) -> Option<RunHandle> {
		let key = self.chart.push_at(index)?;
		self.show(key)
	}

	/// Shows details for `key` unless it is already the current one.
	pub fn show(&mut self, key: PushKey) -> Option<RunHandle> {
		if self.details.current_key().is_some_and(|current| current.same_as(&key)) {
			trace!(key = %key, "dashboard.show.unchanged");
			return None;
		}
		self.details.submit(key)
	}

	/// Stops detail loading for good, e.g. when the page is closed.
	pub fn close(&mut self) {
		self.details.teardown();
	}
}
