/* src/registry/write.rs */

use std::any::{Any, TypeId, type_name};
use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Instant;

use super::{Registry, Slot};
use crate::{Meta, Policy, ProvideError};

impl Registry {
	/// Returns the instance of `T`, constructing it with `init` if absent.
	///
	/// Concurrent callers for the same type construct once. A failed `init`
	/// leaves `T` unregistered and the error is returned. If waiting for `T`
	/// would deadlock on a dependency cycle, returns
	/// [`ProvideError::Reentrant`].
	pub fn get_or_try_init<T, E, F>(&self, init: F) -> Result<Arc<T>, ProvideError<E>>
	where
		T: Any + Send + Sync,
		F: FnOnce() -> Result<T, E>,
	{
		if let Some(value) = self.get::<T>() {
			return Ok(value);
		}

		let id = TypeId::of::<T>();
		let type_lock = self.type_lock(id);
		let Some(_held) = self.enter(&type_lock, id) else {
			tracing::warn!(
				provider = type_name::<T>(),
				"dependency cycle, construction refused"
			);
			return Err(ProvideError::Reentrant {
				name: type_name::<T>().to_string(),
			});
		};

		// Another thread may have published while we waited on the lock.
		if let Some(value) = self.get::<T>() {
			return Ok(value);
		}

		tracing::debug!(provider = type_name::<T>(), "constructing instance");
		let value = init().map_err(|source| {
			tracing::warn!(
				provider = type_name::<T>(),
				"construction failed, type left unregistered"
			);
			ProvideError::Construct {
				name: type_name::<T>().to_string(),
				source,
			}
		})?;

		Ok(self.publish(Arc::new(value), Policy::DoubleChecked))
	}

	/// Registers an already built instance of `T`.
	pub fn register<T>(&self, value: T) -> Result<Arc<T>, ProvideError<Infallible>>
	where
		T: Any + Send + Sync,
	{
		let id = TypeId::of::<T>();
		let type_lock = self.type_lock(id);
		let Some(_held) = self.enter(&type_lock, id) else {
			return Err(ProvideError::Reentrant {
				name: type_name::<T>().to_string(),
			});
		};

		if self.contains::<T>() {
			return Err(ProvideError::AlreadyInitialized {
				name: type_name::<T>().to_string(),
			});
		}

		Ok(self.publish(Arc::new(value), Policy::Eager))
	}

	/// Inserts the slot for `T`. The caller holds the type's lock.
	fn publish<T>(&self, value: Arc<T>, policy: Policy) -> Arc<T>
	where
		T: Any + Send + Sync,
	{
		let sequence = self.constructions.fetch_add(1, Ordering::AcqRel) + 1;
		let slot = Slot {
			value: Arc::clone(&value) as Arc<dyn Any + Send + Sync>,
			type_name: type_name::<T>(),
			meta: Meta {
				created_at: Instant::now(),
				policy,
				sequence,
			},
		};

		// Other types may be published concurrently; rcu retries on conflict.
		self.inner.rcu(|map| {
			let mut new_map = (**map).clone();
			new_map.insert(TypeId::of::<T>(), slot.clone());
			new_map
		});

		tracing::info!(
			provider = type_name::<T>(),
			policy = %policy,
			sequence,
			"instance published"
		);

		value
	}
}
