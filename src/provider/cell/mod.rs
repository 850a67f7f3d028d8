/* src/provider/cell/mod.rs */

mod access;
mod construct;
mod read;

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::AtomicU64;

use arc_swap::ArcSwapOption;

use super::state::AtomicState;
#[cfg(feature = "events")]
use super::ProvideEvent;
use super::{Entry, Policy, ProvideError, State};
use crate::lock::ConstructLock;

/// Default event channel capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 16;

/// Hands out one shared instance of `T`, built by `F` under a [`Policy`].
///
/// The published instance lives in an [`ArcSwapOption`], so reads of a
/// constructed instance are a single atomic load with acquire semantics and
/// never observe a partially built value.
///
/// The lazy constructors are `const`, so a provider can be a `static`:
///
/// ```
/// use onehold::Provider;
/// use std::convert::Infallible;
///
/// fn connect() -> Result<String, Infallible> {
/// 	Ok("pool".to_string())
/// }
///
/// static POOL: Provider<String> = Provider::double_checked(connect);
///
/// let a = POOL.get_instance().unwrap();
/// let b = POOL.get_instance().unwrap();
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// ```
pub struct Provider<T, E = Infallible, F = fn() -> Result<T, E>> {
	pub(crate) slot: ArcSwapOption<Entry<T>>,
	pub(crate) state: AtomicState,
	pub(crate) lock: ConstructLock,
	pub(crate) policy: Policy,
	pub(crate) name: Option<Cow<'static, str>>,
	pub(crate) init: F,
	pub(crate) attempts: AtomicU64,
	pub(crate) constructions: AtomicU64,
	#[cfg(feature = "events")]
	pub(crate) events: std::sync::OnceLock<tokio::sync::broadcast::Sender<ProvideEvent<T>>>,
	#[cfg(feature = "events")]
	pub(crate) event_capacity: usize,
	pub(crate) _error: PhantomData<fn() -> E>,
}

impl<T, E, F> Provider<T, E, F>
where
	F: Fn() -> Result<T, E>,
{
	pub(crate) const fn with_parts(policy: Policy, name: Option<Cow<'static, str>>, init: F) -> Self {
		Self {
			slot: ArcSwapOption::const_empty(),
			state: AtomicState::new(State::Uninitialized),
			lock: ConstructLock::new(),
			policy,
			name,
			init,
			attempts: AtomicU64::new(0),
			constructions: AtomicU64::new(0),
			#[cfg(feature = "events")]
			events: std::sync::OnceLock::new(),
			#[cfg(feature = "events")]
			event_capacity: DEFAULT_EVENT_CAPACITY,
			_error: PhantomData,
		}
	}

	/// Builds the instance now and returns a provider that is already `Ready`.
	pub fn eager(init: F) -> Result<Self, ProvideError<E>> {
		Self::with_policy(Policy::Eager, init)
	}

	/// Lazy provider without synchronization. See [`Policy::Unsynchronized`].
	pub const fn unsynchronized(init: F) -> Self {
		Self::with_parts(Policy::Unsynchronized, None, init)
	}

	/// Lazy provider that locks on every access.
	pub const fn synchronized(init: F) -> Self {
		Self::with_parts(Policy::Synchronized, None, init)
	}

	/// Lazy provider that locks only while no instance exists.
	pub const fn double_checked(init: F) -> Self {
		Self::with_parts(Policy::DoubleChecked, None, init)
	}

	/// Creates a provider for a policy chosen at runtime.
	///
	/// Fails only for [`Policy::Eager`], when the construction fails.
	pub fn with_policy(policy: Policy, init: F) -> Result<Self, ProvideError<E>> {
		let provider = Self::with_parts(policy, None, init);
		provider.prime()?;
		Ok(provider)
	}

	/// Constructs immediately if the policy is eager.
	pub(crate) fn prime(&self) -> Result<(), ProvideError<E>> {
		if !self.policy.is_lazy() {
			self.construct()?;
		}
		Ok(())
	}

	/// Sets the name used in errors, events and logs.
	pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
		self.name = Some(name.into());
		self
	}
}

impl<T, E, F> fmt::Debug for Provider<T, E, F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Provider")
			.field("name", &self.name())
			.field("policy", &self.policy)
			.field("state", &self.state.load())
			.field("constructions", &self.constructions())
			.finish()
	}
}
