use sizewatch_primitives::{ChunkSeries, PushKey, SizeKind};

/// Chunk shown when nothing else is selected.
pub const DEFAULT_CHUNK: &str = "build";

/// One drawable line: a chunk's sizes of the selected kind, oldest push first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRow<'a> {
	pub chunk: &'a str,
	pub values: Vec<u64>,
}

/// Selection state and data behind the size chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartModel {
	available: Option<Vec<String>>,
	selected: Vec<String>,
	size: SizeKind,
	series: Vec<ChunkSeries>,
}

impl Default for ChartModel {
	fn default() -> Self {
		Self {
			available: None,
			selected: vec![DEFAULT_CHUNK.to_string()],
			size: SizeKind::default(),
			series: Vec::new(),
		}
	}
}

impl ChartModel {
	pub fn new() -> Self {
		Self::default()
	}

	/// Chunk names offered for selection, `None` until the list has loaded.
	pub fn available(&self) -> Option<&[String]> {
		self.available.as_deref()
	}

	pub fn set_available(&mut self, chunks: Vec<String>) {
		self.available = Some(chunks);
	}

	pub fn selected_chunks(&self) -> &[String] {
		&self.selected
	}

	/// Replaces the selection. An empty selection falls back to [`DEFAULT_CHUNK`].
	///
	/// Returns true when the selection changed and series must be reloaded.
	pub fn set_chunks(&mut self, chunks: Vec<String>) -> bool {
		let chunks = if chunks.is_empty() {
			vec![DEFAULT_CHUNK.to_string()]
		} else {
			chunks
		};
		if chunks == self.selected {
			return false;
		}
		self.selected = chunks;
		true
	}

	/// Checks or unchecks one chunk, keeping the order chunks were checked in.
	pub fn toggle_chunk(&mut self, name: &str, checked: bool) -> bool {
		let mut chunks = self.selected.clone();
		if checked {
			if !chunks.iter().any(|c| c == name) {
				chunks.push(name.to_string());
			}
		} else {
			chunks.retain(|c| c != name);
		}
		self.set_chunks(chunks)
	}

	pub fn size(&self) -> SizeKind {
		self.size
	}

	pub fn set_size(&mut self, size: SizeKind) {
		self.size = size;
	}

	pub fn series(&self) -> &[ChunkSeries] {
		&self.series
	}

	pub fn set_series(&mut self, series: Vec<ChunkSeries>) {
		self.series = series;
	}

	/// Lines to draw for the current size kind.
	pub fn chart_rows(&self) -> Vec<ChartRow<'_>> {
		self.series
			.iter()
			.map(|series| ChartRow {
				chunk: &series.chunk,
				values: series.points.iter().map(|p| p.size(self.size)).collect(),
			})
			.collect()
	}

	/// Number of pushes along the chart's x axis.
	pub fn push_count(&self) -> usize {
		self.series.first().map_or(0, |s| s.points.len())
	}

	/// Key for the push at `index` of the first series, compared with the push before it.
	pub fn push_at(&self, index: usize) -> Option<PushKey> {
		let points = &self.series.first()?.points;
		let point = points.get(index)?;
		let prev = index.checked_sub(1).and_then(|i| points.get(i)).map(|p| p.sha.clone());
		Some(PushKey::from_parts(point.sha.clone(), prev))
	}
}
