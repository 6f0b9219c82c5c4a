//! Core types for build-size history: push identifiers, records, and fetch errors.

/// Errors reported by record lookups.
pub mod error;
/// Push identifier pairs.
pub mod key;
/// Push, delta, and chart records as served by the dashboard endpoints.
pub mod record;
/// Size measurement kinds.
pub mod size;

pub use error::FetchError;
pub use key::PushKey;
pub use record::{ChartPoint, ChunkDelta, ChunkSeries, Delta, Push, SizeChange};
pub use size::SizeKind;
