//! View models for the build-size dashboard.
//!
//! Drawing is left to frontends; these types hold selection state, derive
//! what to draw, and turn pointer movement over the chart into detail loads.

/// Chunk and size selection plus loaded chart series.
pub mod chart;
/// Chart selection bound to a detail loader.
pub mod dashboard;
/// Text rendering of push details.
pub mod details;
/// Dashboard URL routes.
pub mod route;

pub use chart::{ChartModel, ChartRow, DEFAULT_CHUNK};
pub use dashboard::Dashboard;
pub use details::DetailsView;
pub use route::Route;
