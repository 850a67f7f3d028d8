/* src/registry/mod.rs */

//!
//! Type-keyed singleton container.

mod cycle;
mod read;
mod write;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;

use crate::Meta;
use crate::lock::ConstructLock;
use cycle::WaitGraph;

#[derive(Clone)]
pub(crate) struct Slot {
	pub(crate) value: Arc<dyn Any + Send + Sync>,
	pub(crate) type_name: &'static str,
	pub(crate) meta: Meta,
}

/// Holds at most one instance per type.
///
/// Uses RCU (Read-Copy-Update) for lock-free reads. Construction of each type
/// is double-checked under its own lock, so a constructor may resolve other
/// types from the same registry.
///
/// A dependency cycle fails with [`ProvideError::Reentrant`](crate::ProvideError::Reentrant)
/// instead of deadlocking, whether the cycle stays on one thread or spans
/// several (A needs B on one thread while B needs A on another).
pub struct Registry {
	pub(crate) inner: ArcSwap<HashMap<TypeId, Slot>>,
	pub(crate) locks: Mutex<HashMap<TypeId, Arc<ConstructLock>>>,
	pub(crate) graph: Mutex<WaitGraph>,
	pub(crate) constructions: AtomicU64,
}

impl Registry {
	/// Creates a new empty registry.
	pub fn new() -> Self {
		Self {
			inner: ArcSwap::from_pointee(HashMap::new()),
			locks: Mutex::new(HashMap::new()),
			graph: Mutex::new(WaitGraph::default()),
			constructions: AtomicU64::new(0),
		}
	}

	/// Returns the construction lock for `id`, creating it on first use.
	pub(crate) fn type_lock(&self, id: TypeId) -> Arc<ConstructLock> {
		let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
		Arc::clone(
			locks
				.entry(id)
				.or_insert_with(|| Arc::new(ConstructLock::new())),
		)
	}
}

impl Default for Registry {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for Registry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Registry")
			.field("types", &self.type_names())
			.finish()
	}
}
