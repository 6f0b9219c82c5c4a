use sizewatch_loader::{LoadSnapshot, Slot};
use sizewatch_primitives::{Delta, PushKey, SizeKind};

const PENDING: &str = "...";

/// Renders a push's details as plain text lines.
#[derive(Debug, Clone, Copy)]
pub struct DetailsView<'a> {
	/// GitHub `owner/name` used for commit links, if any.
	pub repository: Option<&'a str>,
	pub size: SizeKind,
}

impl<'a> DetailsView<'a> {
	pub fn new(repository: Option<&'a str>, size: SizeKind) -> Self {
		Self { repository, size }
	}

	/// Link to the commit on GitHub.
	pub fn commit_url(&self, sha: &str) -> Option<String> {
		self.repository.map(|repo| format!("https://github.com/{repo}/commit/{sha}"))
	}

	pub fn render(&self, key: &PushKey, state: &LoadSnapshot) -> Vec<String> {
		let mut lines = Vec::new();
		let mut commit = format!("Commit: {} ({})", key.sha(), key.link_path());
		if let Some(url) = self.commit_url(key.sha()) {
			commit.push_str(&format!(" code: {url}"));
		}
		lines.push(commit);

		let push = state.push();
		lines.push(format!("Author: {}", push.map_or(PENDING, |p| p.author.as_str())));
		lines.push(format!("At: {}", push.map_or(PENDING, |p| p.created_at.as_str())));
		lines.push(format!(
			"Message: {}",
			push.map_or(PENDING, |p| p.message.lines().next().unwrap_or_default())
		));

		match &state.delta {
			Slot::Loaded(delta) => self.render_delta(delta, &mut lines),
			Slot::Unloaded if state.error.is_none() => lines.push(format!("Delta: {PENDING}")),
			Slot::Unloaded | Slot::NotApplicable => {}
		}

		if let Some(error) = &state.error {
			lines.push(format!("Error: {error}"));
		}
		lines
	}

	fn render_delta(&self, delta: &Delta, lines: &mut Vec<String>) {
		lines.push(format!("Delta ({}): {:+} B", self.size, delta.total(self.size)));
		let changed = delta.changed(self.size);
		if changed.is_empty() {
			lines.push("  no changes".to_string());
		}
		for chunk in changed {
			let change = chunk.size(self.size);
			lines.push(format!("  {}: {:+} B ({} -> {})", chunk.chunk, change.diff(), change.before, change.after));
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use sizewatch_loader::{LoadError, LoadStage};
	use sizewatch_primitives::{ChunkDelta, FetchError, Push, SizeChange};

	use super::*;

	fn push() -> Push {
		Push {
			sha: "abc".to_string(),
			author: "dev".to_string(),
			created_at: "2018-06-01".to_string(),
			message: "Shrink vendor bundle\n\nLonger body".to_string(),
		}
	}

	fn delta() -> Delta {
		Delta {
			chunks: vec![ChunkDelta {
				chunk: "vendor".to_string(),
				stat_size: SizeChange::default(),
				parsed_size: SizeChange::default(),
				gzip_size: SizeChange { before: 500, after: 380 },
			}],
		}
	}

	#[test]
	fn pending_state_shows_placeholders() {
		let view = DetailsView::new(None, SizeKind::GzipSize);
		let state = LoadSnapshot {
			generation: 1,
			loading: true,
			..LoadSnapshot::default()
		};
		let lines = view.render(&PushKey::with_prev("abc", "prev"), &state);
		assert_eq!(
			lines,
			[
				"Commit: abc (/push/abc/prev)",
				"Author: ...",
				"At: ...",
				"Message: ...",
				"Delta: ...",
			]
		);
	}

	#[test]
	fn loaded_state_shows_push_and_delta() {
		let view = DetailsView::new(Some("Automattic/wp-calypso"), SizeKind::GzipSize);
		let state = LoadSnapshot {
			generation: 3,
			loading: false,
			push: Slot::Loaded(push()),
			delta: Slot::Loaded(delta()),
			error: None,
		};
		let lines = view.render(&PushKey::with_prev("abc", "prev"), &state);
		assert_eq!(
			lines,
			[
				"Commit: abc (/push/abc/prev) code: https://github.com/Automattic/wp-calypso/commit/abc",
				"Author: dev",
				"At: 2018-06-01",
				"Message: Shrink vendor bundle",
				"Delta (gzip_size): -120 B",
				"  vendor: -120 B (500 -> 380)",
			]
		);
	}

	#[test]
	fn unchanged_size_kind_and_error_are_reported() {
		let view = DetailsView::new(None, SizeKind::StatSize);
		let state = LoadSnapshot {
			generation: 1,
			loading: false,
			push: Slot::Loaded(push()),
			delta: Slot::Loaded(delta()),
			error: None,
		};
		let lines = view.render(&PushKey::with_prev("abc", "prev"), &state);
		assert_eq!(lines[4..].to_vec(), ["Delta (stat_size): +0 B", "  no changes"]);

		let failed = LoadSnapshot {
			generation: 2,
			loading: false,
			push: Slot::Unloaded,
			delta: Slot::NotApplicable,
			error: Some(LoadError::new(LoadStage::Push, FetchError::NotFound("abc".to_string()))),
		};
		let lines = view.render(&PushKey::new("abc"), &failed);
		assert_eq!(lines.last().map(String::as_str), Some("Error: push lookup failed: not found: abc"));
		assert!(!lines.iter().any(|l| l.starts_with("Delta")));
	}
}
