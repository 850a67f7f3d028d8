/* src/registry/cycle.rs */

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::thread::{self, ThreadId};

use super::Registry;
use crate::lock::{ConstructLock, ConstructLockGuard};

/// Which thread builds each type, and which type each thread waits for.
///
/// A thread about to wait for a type follows `holder -> awaited type ->
/// holder ...`. Reaching itself means waiting would deadlock. Every thread
/// records its hold before it can wait, so the last thread to close a
/// cycle always sees the whole cycle.
#[derive(Default)]
pub(crate) struct WaitGraph {
	holders: HashMap<TypeId, ThreadId>,
	waiting: HashMap<ThreadId, TypeId>,
}

impl WaitGraph {
	/// Records that `thread` waits for `id`. Returns false if that closes a cycle.
	fn wait_for(&mut self, thread: ThreadId, id: TypeId) -> bool {
		let mut next = id;
		// The graph never holds a cycle, so the walk ends within one step per holder.
		for _ in 0..=self.holders.len() {
			let Some(&holder) = self.holders.get(&next) else {
				break;
			};
			if holder == thread {
				return false;
			}
			let Some(&awaited) = self.waiting.get(&holder) else {
				break;
			};
			next = awaited;
		}
		self.waiting.insert(thread, id);
		true
	}

	fn acquired(&mut self, thread: ThreadId, id: TypeId) {
		self.waiting.remove(&thread);
		self.holders.insert(id, thread);
	}

	fn cancel(&mut self, thread: ThreadId) {
		self.waiting.remove(&thread);
	}

	fn released(&mut self, id: TypeId) {
		self.holders.remove(&id);
	}
}

/// Holds the construction lock for one type.
pub(crate) struct Held<'a> {
	graph: &'a Mutex<WaitGraph>,
	id: TypeId,
	_guard: ConstructLockGuard<'a>,
}

impl Drop for Held<'_> {
	fn drop(&mut self) {
		// Runs before `_guard` releases the lock, so the next holder's
		// record is never removed by us.
		lock_graph(self.graph).released(self.id);
	}
}

fn lock_graph(graph: &Mutex<WaitGraph>) -> std::sync::MutexGuard<'_, WaitGraph> {
	graph.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Registry {
	/// Takes the construction lock of `id`.
	///
	/// Returns `None` instead of blocking when the wait would deadlock: the
	/// calling thread already builds `id`, or the thread building `id` is
	/// waiting, directly or through others, on a type this thread builds.
	pub(crate) fn enter<'a>(&'a self, lock: &'a ConstructLock, id: TypeId) -> Option<Held<'a>> {
		let current = thread::current().id();
		if !lock_graph(&self.graph).wait_for(current, id) {
			return None;
		}

		let Some(guard) = lock.acquire() else {
			lock_graph(&self.graph).cancel(current);
			return None;
		};
		lock_graph(&self.graph).acquired(current, id);

		Some(Held {
			graph: &self.graph,
			id,
			_guard: guard,
		})
	}
}
