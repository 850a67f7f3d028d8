/* src/provider/cell/read.rs */

use std::any::type_name;
use std::sync::Arc;
use std::sync::atomic::Ordering;

#[cfg(feature = "events")]
use super::super::ProvideEvent;
use super::super::{Entry, Meta, Policy, State};
use super::Provider;

impl<T, E, F> Provider<T, E, F> {
	/// Returns the published instance without constructing. Wait-free.
	pub fn get(&self) -> Option<Arc<T>> {
		let snapshot = self.slot.load();
		snapshot.as_deref().map(|entry| Arc::clone(&entry.value))
	}

	/// Returns the published instance with its metadata.
	pub fn entry(&self) -> Option<Entry<T>> {
		let snapshot = self.slot.load();
		snapshot.as_deref().cloned()
	}

	pub fn meta(&self) -> Option<Meta> {
		let snapshot = self.slot.load();
		snapshot.as_deref().map(|entry| entry.meta.clone())
	}

	pub fn state(&self) -> State {
		self.state.load()
	}

	/// Returns true once an instance has been published.
	pub fn is_ready(&self) -> bool {
		self.slot.load().is_some()
	}

	pub fn policy(&self) -> Policy {
		self.policy
	}

	/// Name used in errors, events and logs. Defaults to the type name of `T`.
	pub fn name(&self) -> &str {
		self.name.as_deref().unwrap_or_else(|| type_name::<T>())
	}

	/// Number of successful constructions.
	pub fn constructions(&self) -> u64 {
		self.constructions.load(Ordering::Acquire)
	}

	/// Number of constructions started, failed ones included.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Subscribes to construction events.
	///
	/// The channel is created on the first subscription; earlier events are
	/// not replayed.
	#[cfg(feature = "events")]
	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<ProvideEvent<T>> {
		self.events
			.get_or_init(|| tokio::sync::broadcast::channel(self.event_capacity).0)
			.subscribe()
	}
}
