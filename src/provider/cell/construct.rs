/* src/provider/cell/construct.rs */

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Instant;

#[cfg(feature = "events")]
use super::super::ProvideEvent;
use super::super::state::AtomicState;
use super::super::{Entry, Meta, ProvideError};
use super::Provider;

/// Returns the state to `Uninitialized` unless the construction committed.
struct ConstructGuard<'a> {
	state: &'a AtomicState,
	committed: bool,
}

impl<'a> ConstructGuard<'a> {
	fn enter(state: &'a AtomicState) -> Self {
		state.begin();
		Self {
			state,
			committed: false,
		}
	}

	fn commit(mut self) {
		self.committed = true;
		self.state.publish();
	}
}

impl Drop for ConstructGuard<'_> {
	fn drop(&mut self) {
		if !self.committed {
			self.state.abort();
		}
	}
}

impl<T, E, F> Provider<T, E, F>
where
	F: Fn() -> Result<T, E>,
{
	/// Runs the construction function and publishes the result.
	///
	/// Callers hold the construction lock, except under
	/// the unsynchronized policy.
	pub(crate) fn construct(&self) -> Result<Arc<T>, ProvideError<E>> {
		let attempt = self.attempts.fetch_add(1, Ordering::Relaxed) + 1;
		let guard = ConstructGuard::enter(&self.state);

		tracing::debug!(
			provider = %self.name(),
			policy = %self.policy,
			attempt,
			"constructing instance"
		);

		let value = match (self.init)() {
			Ok(value) => Arc::new(value),
			Err(source) => {
				drop(guard);
				tracing::warn!(
					provider = %self.name(),
					policy = %self.policy,
					attempt,
					"construction failed, provider left uninitialized"
				);
				#[cfg(feature = "events")]
				self.emit(ProvideEvent::Failed {
					name: self.name().to_string(),
					attempt,
				});
				return Err(ProvideError::Construct {
					name: self.name().to_string(),
					source,
				});
			}
		};

		let created_at = Instant::now();
		let entry_for = |previous: &Option<Arc<Entry<T>>>| Entry {
			value: Arc::clone(&value),
			meta: Meta {
				created_at,
				policy: self.policy,
				sequence: previous.as_deref().map_or(1, |old| old.meta.sequence + 1),
			},
		};

		// The sequence follows the entry actually replaced, so racing
		// publishers number their instances in publication order.
		let previous = self.slot.rcu(|current| Some(Arc::new(entry_for(current))));
		let entry = entry_for(&previous);
		let sequence = entry.meta.sequence;
		self.constructions.fetch_add(1, Ordering::AcqRel);
		guard.commit();

		match previous {
			None => {
				tracing::info!(
					provider = %self.name(),
					policy = %self.policy,
					sequence,
					"instance published"
				);
				#[cfg(feature = "events")]
				self.emit(ProvideEvent::Constructed {
					name: self.name().to_string(),
					value: entry.value,
					meta: entry.meta,
				});
			}
			// Only reachable without a lock: a concurrent first access
			// published between our check and our swap.
			Some(old) => {
				debug_assert!(!self.policy.is_thread_safe());
				tracing::warn!(
					provider = %self.name(),
					policy = %self.policy,
					sequence,
					"duplicate construction replaced a published instance"
				);
				#[cfg(feature = "events")]
				self.emit(ProvideEvent::Replaced {
					name: self.name().to_string(),
					old: Arc::clone(&old.value),
					new: entry.value,
					meta: entry.meta,
				});
				#[cfg(not(feature = "events"))]
				{
					let _ = old;
				}
			}
		}

		Ok(value)
	}

	#[cfg(feature = "events")]
	fn emit(&self, event: ProvideEvent<T>) {
		// No channel means nobody subscribed yet.
		if let Some(events) = self.events.get() {
			let _ = events.send(event);
		}
	}
}
