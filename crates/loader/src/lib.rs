//! Push detail loading with debounce and stale-response protection.
//!
//! A [`DetailLoader`] is handed a new [`PushKey`] whenever its consumer's
//! selection changes. Each submission starts a run that waits out the quiet
//! period, fetches the push and then its delta from a [`DataSource`], and
//! commits each result to the [`ResultSink`] only while its generation is
//! still the current one. Superseded runs are cancelled and anything they
//! produce afterwards is discarded.
//!
//! [`PushKey`]: sizewatch_primitives::PushKey

mod config;
mod error;
mod loader;
mod phase;
mod sink;
mod source;
mod state;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::LoaderConfig;
pub use error::{ErrorKind, LoadError, LoadStage};
pub use loader::{DetailLoader, RunHandle};
pub use phase::RunPhase;
pub use sink::{ResultSink, WatchSink};
pub use source::DataSource;
pub use state::{LoadSnapshot, Slot};
