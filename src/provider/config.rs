/* src/provider/config.rs */

#[cfg(feature = "serde")]
use serde::Deserialize;

use super::{DEFAULT_EVENT_CAPACITY, Policy};

/// Declarative provider settings, e.g. read from an application config file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProviderConfig {
	/// Name used in errors, events and logs.
	pub name: Option<String>,
	pub policy: Policy,
	/// Capacity of the event channel. Ignored without the `events` feature.
	pub event_capacity: usize,
}

impl Default for ProviderConfig {
	fn default() -> Self {
		Self {
			name: None,
			policy: Policy::default(),
			event_capacity: DEFAULT_EVENT_CAPACITY,
		}
	}
}
