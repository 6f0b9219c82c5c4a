//! Worker primitives shared by sizewatch loaders.
//!
//! Tasks are spawned onto the ambient Tokio runtime when one is entered, or onto
//! a small lazily built fallback runtime otherwise. Every spawned run carries a
//! [`RunToken`] that ties a cancellation signal to the generation it serves.

mod spawn;
mod token;

pub use spawn::spawn;
pub use token::{RunSlot, RunToken};
