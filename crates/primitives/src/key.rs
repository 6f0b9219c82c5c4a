use std::fmt;

/// Identifies which push to load and, optionally, the push it is compared against.
///
/// A missing predecessor is meaningful: the first push in a history has no delta.
/// Keys are immutable; every change of selection produces a new key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushKey {
	sha: String,
	prev_sha: Option<String>,
}

impl PushKey {
	/// Creates a key without a predecessor.
	pub fn new(sha: impl Into<String>) -> Self {
		Self {
			sha: sha.into(),
			prev_sha: None,
		}
	}

	/// Creates a key comparing `sha` against `prev_sha`.
	pub fn with_prev(sha: impl Into<String>, prev_sha: impl Into<String>) -> Self {
		Self {
			sha: sha.into(),
			prev_sha: Some(prev_sha.into()),
		}
	}

	/// Creates a key from an optional predecessor.
	pub fn from_parts(sha: impl Into<String>, prev_sha: Option<String>) -> Self {
		Self { sha: sha.into(), prev_sha }
	}

	pub fn sha(&self) -> &str {
		&self.sha
	}

	pub fn prev_sha(&self) -> Option<&str> {
		self.prev_sha.as_deref()
	}

	/// Returns true iff both the push and its predecessor match, including both absent.
	pub fn same_as(&self, other: &PushKey) -> bool {
		self == other
	}

	/// Dashboard path for this key, `/push/<sha>` with `/<prev>` appended when present.
	///
	/// Empty parts are skipped so an empty predecessor never produces a trailing slash.
	pub fn link_path(&self) -> String {
		[Some(self.sha.as_str()), self.prev_sha()]
			.into_iter()
			.flatten()
			.filter(|part| !part.is_empty())
			.fold(String::from("/push"), |mut joined, part| {
				joined.push('/');
				joined.push_str(part);
				joined
			})
	}
}

impl fmt::Display for PushKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.prev_sha {
			Some(prev) => write!(f, "{prev}..{}", self.sha),
			None => f.write_str(&self.sha),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn same_as_compares_both_fields() {
		assert!(PushKey::new("a").same_as(&PushKey::new("a")));
		assert!(PushKey::with_prev("a", "b").same_as(&PushKey::with_prev("a", "b")));
		assert!(!PushKey::new("a").same_as(&PushKey::with_prev("a", "b")));
		assert!(!PushKey::with_prev("a", "b").same_as(&PushKey::with_prev("a", "c")));
		assert!(!PushKey::new("a").same_as(&PushKey::new("b")));
	}

	#[test]
	fn link_path_skips_missing_and_empty_parts() {
		assert_eq!(PushKey::new("abc").link_path(), "/push/abc");
		assert_eq!(PushKey::with_prev("abc", "def").link_path(), "/push/abc/def");
		assert_eq!(PushKey::with_prev("abc", "").link_path(), "/push/abc");
	}

	#[test]
	fn display_shows_range() {
		assert_eq!(PushKey::with_prev("new", "old").to_string(), "old..new");
		assert_eq!(PushKey::new("new").to_string(), "new");
	}
}
