//! HTTP access to the build-size dashboard endpoints.
//!
//! [`ApiClient`] implements [`sizewatch_loader::DataSource`] for push details and
//! also serves the chunk list and chart series the dashboard draws.

mod client;
mod endpoints;
mod error;
mod source;

pub use client::ApiClient;
pub use error::{ApiError, Result};
