/* src/provider/mod.rs */

//!
//! Single-instance providers.
//!
//! - [`Provider`] - one shared instance built under a [`Policy`]
//! - [`ProviderBuilder`] / [`ProviderConfig`] - configuration

mod builder;
mod cell;
mod config;
mod entry;
mod error;
#[cfg(feature = "events")]
mod event;
mod meta;
mod policy;
mod state;

pub use builder::ProviderBuilder;
pub use cell::{DEFAULT_EVENT_CAPACITY, Provider};
pub use config::ProviderConfig;
pub use entry::Entry;
pub use error::{ParsePolicyError, ProvideError};
#[cfg(feature = "events")]
pub use event::ProvideEvent;
pub use meta::Meta;
pub use policy::Policy;
pub use state::State;
