/* src/provider/event.rs */

use std::sync::Arc;

use super::Meta;

/// Events emitted by a provider on construction.
#[derive(Debug)]
pub enum ProvideEvent<T> {
	/// An instance was constructed and published.
	Constructed {
		name: String,
		value: Arc<T>,
		meta: Meta,
	},
	/// An unsynchronized race published a second instance over the first.
	Replaced {
		name: String,
		old: Arc<T>,
		new: Arc<T>,
		meta: Meta,
	},
	/// Construction failed; the provider stays uninitialized.
	Failed { name: String, attempt: u64 },
}

impl<T> Clone for ProvideEvent<T> {
	fn clone(&self) -> Self {
		match self {
			ProvideEvent::Constructed { name, value, meta } => ProvideEvent::Constructed {
				name: name.clone(),
				value: Arc::clone(value),
				meta: meta.clone(),
			},
			ProvideEvent::Replaced {
				name,
				old,
				new,
				meta,
			} => ProvideEvent::Replaced {
				name: name.clone(),
				old: Arc::clone(old),
				new: Arc::clone(new),
				meta: meta.clone(),
			},
			ProvideEvent::Failed { name, attempt } => ProvideEvent::Failed {
				name: name.clone(),
				attempt: *attempt,
			},
		}
	}
}
