/* src/registry/read.rs */

use std::any::{Any, TypeId};
use std::sync::Arc;

use super::Registry;
use crate::Meta;

impl Registry {
	/// Gets the instance of `T`, if one was built. This is a wait-free operation.
	pub fn get<T>(&self) -> Option<Arc<T>>
	where
		T: Any + Send + Sync,
	{
		let snapshot = self.inner.load();
		snapshot
			.get(&TypeId::of::<T>())
			.and_then(|slot| Arc::clone(&slot.value).downcast::<T>().ok())
	}

	/// Gets metadata for the instance of `T`.
	pub fn get_meta<T: Any>(&self) -> Option<Meta> {
		let snapshot = self.inner.load();
		snapshot
			.get(&TypeId::of::<T>())
			.map(|slot| slot.meta.clone())
	}

	pub fn contains<T: Any>(&self) -> bool {
		self.inner.load().contains_key(&TypeId::of::<T>())
	}

	/// Returns the type names of all registered instances.
	pub fn type_names(&self) -> Vec<&'static str> {
		let snapshot = self.inner.load();
		snapshot.values().map(|slot| slot.type_name).collect()
	}

	/// Returns the number of registered instances.
	pub fn len(&self) -> usize {
		self.inner.load().len()
	}

	/// Returns true if the registry is empty.
	pub fn is_empty(&self) -> bool {
		self.inner.load().is_empty()
	}
}
