/* src/lib.rs */

//!
//! Single-instance providers.
//!
//! This crate hands out one shared instance of a value, built at most once
//! even when many threads ask for it at the same time:
//!
//! - **provider**: [`Provider`], one instance per provider, built under one of
//!   four [`Policy`] values (eager, unsynchronized lazy, synchronized lazy,
//!   double-checked lazy).
//! - **registry**: [`Registry`], one instance per type, for containers that
//!   resolve many singletons.
//!
//! A construction function may fail. Failures are returned to the caller,
//! nothing is cached, and the next access retries.
//!
//! ## Feature Flags
//!
//! - `full`: Enables all features.
//! - `events`: Enables construction event broadcasting for `Provider`.
//! - `serde`: Enables deserializing [`ProviderConfig`] and [`Policy`].
//!
//! ## Basic Usage
//!
//! See `demos/singleton.rs` for a complete example.

mod lock;
pub mod provider;
pub mod registry;

#[cfg(feature = "events")]
pub use provider::ProvideEvent;
pub use provider::{Entry, Meta, Policy, ProvideError, Provider, ProviderBuilder, ProviderConfig, State};
pub use registry::Registry;
