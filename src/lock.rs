/* src/lock.rs */

//!
//! Construction lock shared by [`Provider`](crate::Provider) and
//! [`Registry`](crate::Registry).

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

/// Mutual exclusion for a construction critical section.
///
/// Remembers the owning thread so a constructor that asks for its own
/// instance gets refused instead of deadlocking.
pub(crate) struct ConstructLock {
	lock: Mutex<()>,
	owner: Mutex<Option<ThreadId>>,
}

impl ConstructLock {
	pub(crate) const fn new() -> Self {
		Self {
			lock: Mutex::new(()),
			owner: Mutex::new(None),
		}
	}

	/// Blocks until the lock is free.
	///
	/// Returns `None` if the calling thread already holds it.
	pub(crate) fn acquire(&self) -> Option<ConstructLockGuard<'_>> {
		let current = thread::current().id();
		if *self.owner() == Some(current) {
			return None;
		}

		// A panicking constructor poisons the mutex. The protected data is `()`
		// and the provider state is restored by its own guard, so recover.
		let guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
		*self.owner() = Some(current);

		Some(ConstructLockGuard {
			owner: &self.owner,
			_guard: guard,
		})
	}

	fn owner(&self) -> MutexGuard<'_, Option<ThreadId>> {
		self.owner.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

pub(crate) struct ConstructLockGuard<'a> {
	owner: &'a Mutex<Option<ThreadId>>,
	_guard: MutexGuard<'a, ()>,
}

impl Drop for ConstructLockGuard<'_> {
	fn drop(&mut self) {
		// Runs before `_guard` is released.
		*self.owner.lock().unwrap_or_else(PoisonError::into_inner) = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;

	#[test]
	fn test_reacquire_on_same_thread_is_refused() {
		let lock = ConstructLock::new();
		let guard = lock.acquire();
		assert!(guard.is_some());
		assert!(lock.acquire().is_none());
		drop(guard);
		assert!(lock.acquire().is_some());
	}

	#[test]
	fn test_other_thread_waits_for_release() {
		let lock = Arc::new(ConstructLock::new());
		let guard = lock.acquire();

		let contender = {
			let lock = Arc::clone(&lock);
			thread::spawn(move || lock.acquire().is_some())
		};

		drop(guard);
		assert!(contender.join().unwrap());
	}
}
