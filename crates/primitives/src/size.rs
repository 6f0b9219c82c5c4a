use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Which size measurement of a chunk to look at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SizeKind {
	/// Size of the sources before minification.
	StatSize,
	/// Size of the minified output.
	ParsedSize,
	/// Size of the minified output after gzip.
	#[default]
	GzipSize,
}
