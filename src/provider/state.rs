/* src/provider/state.rs */

use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle of a provider's instance.
///
/// `Ready` is terminal. A failed construction returns to `Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
	Uninitialized,
	Constructing,
	Ready,
}

impl State {
	const fn to_raw(self) -> u8 {
		match self {
			State::Uninitialized => 0,
			State::Constructing => 1,
			State::Ready => 2,
		}
	}

	const fn from_raw(raw: u8) -> Self {
		match raw {
			0 => State::Uninitialized,
			1 => State::Constructing,
			_ => State::Ready,
		}
	}
}

pub(crate) struct AtomicState(AtomicU8);

impl AtomicState {
	pub(crate) const fn new(state: State) -> Self {
		Self(AtomicU8::new(state.to_raw()))
	}

	pub(crate) fn load(&self) -> State {
		State::from_raw(self.0.load(Ordering::Acquire))
	}

	/// `Uninitialized -> Constructing`. Returns false if another thread is
	/// already constructing (only possible without a lock).
	pub(crate) fn begin(&self) -> bool {
		self.0
			.compare_exchange(
				State::Uninitialized.to_raw(),
				State::Constructing.to_raw(),
				Ordering::AcqRel,
				Ordering::Acquire,
			)
			.is_ok()
	}

	/// `Constructing -> Ready`.
	pub(crate) fn publish(&self) {
		self.0.store(State::Ready.to_raw(), Ordering::Release);
	}

	/// `Constructing -> Uninitialized`. A `Ready` state is left untouched.
	pub(crate) fn abort(&self) {
		let _ = self.0.compare_exchange(
			State::Constructing.to_raw(),
			State::Uninitialized.to_raw(),
			Ordering::AcqRel,
			Ordering::Acquire,
		);
	}
}
