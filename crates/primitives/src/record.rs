use serde::{Deserialize, Serialize};

use crate::SizeKind;

/// One recorded push to the tracked branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Push {
	pub sha: String,
	pub author: String,
	pub created_at: String,
	#[serde(default)]
	pub message: String,
}

/// Size of one measurement before and after a push.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeChange {
	#[serde(default)]
	pub before: u64,
	#[serde(default)]
	pub after: u64,
}

impl SizeChange {
	/// Signed change in bytes, positive when the chunk grew.
	///
	/// Saturates at the bounds of `i64`.
	pub fn diff(&self) -> i64 {
		let diff = i128::from(self.after) - i128::from(self.before);
		diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
	}
}

/// Per-chunk size changes between two pushes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkDelta {
	pub chunk: String,
	#[serde(default)]
	pub stat_size: SizeChange,
	#[serde(default)]
	pub parsed_size: SizeChange,
	#[serde(default)]
	pub gzip_size: SizeChange,
}

impl ChunkDelta {
	pub fn size(&self, kind: SizeKind) -> SizeChange {
		match kind {
			SizeKind::StatSize => self.stat_size,
			SizeKind::ParsedSize => self.parsed_size,
			SizeKind::GzipSize => self.gzip_size,
		}
	}
}

/// Size delta between a push and its predecessor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
	#[serde(default)]
	pub chunks: Vec<ChunkDelta>,
}

impl Delta {
	/// Chunks whose `kind` size changed, largest absolute change first.
	pub fn changed(&self, kind: SizeKind) -> Vec<&ChunkDelta> {
		let mut changed: Vec<_> = self.chunks.iter().filter(|c| c.size(kind).diff() != 0).collect();
		changed.sort_by_key(|c| std::cmp::Reverse(c.size(kind).diff().unsigned_abs()));
		changed
	}

	/// Net change across all chunks for `kind`.
	pub fn total(&self, kind: SizeKind) -> i64 {
		self.chunks.iter().fold(0, |total: i64, c| total.saturating_add(c.size(kind).diff()))
	}
}

/// One point of a chunk's size history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
	pub sha: String,
	#[serde(default)]
	pub created_at: String,
	#[serde(default)]
	pub stat_size: u64,
	#[serde(default)]
	pub parsed_size: u64,
	#[serde(default)]
	pub gzip_size: u64,
}

impl ChartPoint {
	pub fn size(&self, kind: SizeKind) -> u64 {
		match kind {
			SizeKind::StatSize => self.stat_size,
			SizeKind::ParsedSize => self.parsed_size,
			SizeKind::GzipSize => self.gzip_size,
		}
	}
}

/// Size history of one chunk, oldest push first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSeries {
	pub chunk: String,
	pub points: Vec<ChartPoint>,
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn chunk(name: &str, before: u64, after: u64) -> ChunkDelta {
		ChunkDelta {
			chunk: name.to_string(),
			stat_size: SizeChange::default(),
			parsed_size: SizeChange::default(),
			gzip_size: SizeChange { before, after },
		}
	}

	#[test]
	fn delta_orders_changes_by_magnitude() {
		let delta = Delta {
			chunks: vec![chunk("build", 100, 110), chunk("vendor", 500, 300), chunk("same", 7, 7)],
		};
		let names: Vec<_> = delta.changed(SizeKind::GzipSize).iter().map(|c| c.chunk.as_str()).collect();
		assert_eq!(names, ["vendor", "build"]);
		assert_eq!(delta.total(SizeKind::GzipSize), -190);
		assert_eq!(delta.total(SizeKind::StatSize), 0);
	}

	#[test]
	fn diff_saturates_for_huge_sizes() {
		assert_eq!(SizeChange { before: 0, after: u64::MAX }.diff(), i64::MAX);
		assert_eq!(SizeChange { before: u64::MAX, after: 0 }.diff(), i64::MIN);
		assert_eq!(SizeChange { before: u64::MAX, after: u64::MAX - 5 }.diff(), -5);

		let delta = Delta {
			chunks: vec![chunk("a", 0, u64::MAX), chunk("b", 0, u64::MAX)],
		};
		assert_eq!(delta.total(SizeKind::GzipSize), i64::MAX);
	}

	#[test]
	fn chart_point_parses_with_missing_sizes() {
		let point: ChartPoint = serde_json::from_str(r#"{"sha":"abc","gzip_size":42}"#).unwrap();
		assert_eq!(point.size(SizeKind::GzipSize), 42);
		assert_eq!(point.size(SizeKind::StatSize), 0);
		assert_eq!(point.created_at, "");
	}
}
