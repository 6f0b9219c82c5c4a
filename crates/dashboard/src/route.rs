use sizewatch_primitives::PushKey;

/// Page addressed by a dashboard path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
	/// `/`: size chart with hover details.
	Chart,
	/// `/push/<sha>[/<prev>]`: details of one push.
	Push(PushKey),
	/// `/branch`
	Branch,
	/// `/pushlog`
	PushLog,
	NotFound,
}

impl Route {
	/// Matches `path`, ignoring any query string, fragment, and trailing slash.
	pub fn parse(path: &str) -> Self {
		let path = path.split(['?', '#']).next().unwrap_or_default();
		let mut segments = path.split('/').filter(|s| !s.is_empty());
		match (segments.next(), segments.next(), segments.next(), segments.next()) {
			(None, ..) => Self::Chart,
			(Some("branch"), None, ..) => Self::Branch,
			(Some("pushlog"), None, ..) => Self::PushLog,
			(Some("push"), Some(sha), prev, None) => Self::Push(PushKey::from_parts(sha, prev.map(str::to_string))),
			_ => Self::NotFound,
		}
	}

	/// Path that parses back to this route. `NotFound` has none.
	pub fn path(&self) -> Option<String> {
		match self {
			Self::Chart => Some("/".to_string()),
			Self::Push(key) => Some(key.link_path()),
			Self::Branch => Some("/branch".to_string()),
			Self::PushLog => Some("/pushlog".to_string()),
			Self::NotFound => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_known_pages() {
		assert_eq!(Route::parse("/"), Route::Chart);
		assert_eq!(Route::parse(""), Route::Chart);
		assert_eq!(Route::parse("/branch/"), Route::Branch);
		assert_eq!(Route::parse("/pushlog?branch=trunk"), Route::PushLog);
		assert_eq!(Route::parse("/push/abc/def"), Route::Push(PushKey::with_prev("abc", "def")));
		assert_eq!(Route::parse("/push/abc#delta"), Route::Push(PushKey::new("abc")));
	}

	#[test]
	fn rejects_unknown_paths() {
		assert_eq!(Route::parse("/push"), Route::NotFound);
		assert_eq!(Route::parse("/push/a/b/c"), Route::NotFound);
		assert_eq!(Route::parse("/settings"), Route::NotFound);
	}

	#[test]
	fn path_round_trips_push_links() {
		let route = Route::Push(PushKey::with_prev("abc", "def"));
		assert_eq!(route.path().as_deref(), Some("/push/abc/def"));
		assert_eq!(Route::parse(&route.path().unwrap()), route);
	}
}
