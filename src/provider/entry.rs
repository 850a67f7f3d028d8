/* src/provider/entry.rs */

use std::sync::Arc;

use super::Meta;

/// A published instance with its metadata.
#[derive(Debug)]
pub struct Entry<T> {
	/// The shared instance. Identity is the allocation.
	pub value: Arc<T>,
	/// Metadata about this instance.
	pub meta: Meta,
}

// Clones the handle; `T` need not be `Clone`.
impl<T> Clone for Entry<T> {
	fn clone(&self) -> Self {
		Self {
			value: Arc::clone(&self.value),
			meta: self.meta.clone(),
		}
	}
}
