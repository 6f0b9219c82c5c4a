use sizewatch_primitives::{Delta, Push};

use crate::LoadError;

/// One result slot of the load state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Slot<T> {
	#[default]
	Unloaded,
	/// The submitted key has nothing to load for this slot.
	NotApplicable,
	Loaded(T),
}

impl<T> Slot<T> {
	pub fn loaded(&self) -> Option<&T> {
		match self {
			Self::Loaded(value) => Some(value),
			_ => None,
		}
	}

	pub fn is_unloaded(&self) -> bool {
		matches!(self, Self::Unloaded)
	}
}

/// State visible to a [`ResultSink`](crate::ResultSink).
///
/// All fields belong to the same generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSnapshot {
	pub generation: u64,
	pub loading: bool,
	pub push: Slot<Push>,
	pub delta: Slot<Delta>,
	pub error: Option<LoadError>,
}

impl LoadSnapshot {
	pub fn push(&self) -> Option<&Push> {
		self.push.loaded()
	}

	pub fn delta(&self) -> Option<&Delta> {
		self.delta.loaded()
	}
}

/// Mutable load state of one loader, advanced only under its lock.
#[derive(Debug, Default)]
pub(crate) struct LoadState {
	generation: u64,
	push: Slot<Push>,
	delta: Slot<Delta>,
	error: Option<LoadError>,
}

impl LoadState {
	pub(crate) fn generation(&self) -> u64 {
		self.generation
	}

	/// Starts a new generation with cleared slots and returns its number.
	pub(crate) fn advance(&mut self, has_prev: bool) -> u64 {
		self.generation = self.generation.wrapping_add(1);
		self.push = Slot::Unloaded;
		self.delta = if has_prev { Slot::Unloaded } else { Slot::NotApplicable };
		self.error = None;
		self.generation
	}

	pub(crate) fn set_push(&mut self, push: Push) {
		self.push = Slot::Loaded(push);
	}

	pub(crate) fn set_delta(&mut self, delta: Delta) {
		self.delta = Slot::Loaded(delta);
	}

	pub(crate) fn set_error(&mut self, error: LoadError) {
		self.error = Some(error);
	}

	pub(crate) fn is_loading(&self) -> bool {
		self.generation > 0 && self.error.is_none() && (self.push.is_unloaded() || self.delta.is_unloaded())
	}

	pub(crate) fn snapshot(&self) -> LoadSnapshot {
		LoadSnapshot {
			generation: self.generation,
			loading: self.is_loading(),
			push: self.push.clone(),
			delta: self.delta.clone(),
			error: self.error.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use sizewatch_primitives::FetchError;

	use super::*;
	use crate::LoadStage;

	fn push(sha: &str) -> Push {
		Push {
			sha: sha.to_string(),
			author: "dev".to_string(),
			created_at: "2020-01-01".to_string(),
			message: String::new(),
		}
	}

	#[test]
	fn idle_state_is_not_loading() {
		let state = LoadState::default();
		assert!(!state.snapshot().loading);
		assert_eq!(state.generation(), 0);
	}

	#[test]
	fn advance_clears_previous_generation() {
		let mut state = LoadState::default();
		state.advance(true);
		state.set_push(push("a"));
		state.set_error(LoadError::new(LoadStage::Delta, FetchError::Unavailable("down".into())));

		let generation = state.advance(true);
		let snapshot = state.snapshot();
		assert_eq!(generation, 2);
		assert!(snapshot.loading);
		assert_eq!(snapshot.push, Slot::Unloaded);
		assert_eq!(snapshot.delta, Slot::Unloaded);
		assert_eq!(snapshot.error, None);
	}

	#[test]
	fn missing_prev_needs_only_push() {
		let mut state = LoadState::default();
		state.advance(false);
		assert_eq!(state.snapshot().delta, Slot::NotApplicable);
		assert!(state.is_loading());

		state.set_push(push("a"));
		assert!(!state.is_loading());
	}

	#[test]
	fn error_ends_loading() {
		let mut state = LoadState::default();
		state.advance(true);
		state.set_error(LoadError::new(LoadStage::Push, FetchError::NotFound("a".into())));
		assert!(!state.is_loading());
	}
}
