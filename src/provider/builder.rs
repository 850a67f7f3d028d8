/* src/provider/builder.rs */

use std::borrow::Cow;
use std::marker::PhantomData;

#[cfg(feature = "events")]
use super::DEFAULT_EVENT_CAPACITY;
use super::{Policy, ProvideError, Provider, ProviderConfig};

/// Builder for [`Provider`].
pub struct ProviderBuilder<T, E, F> {
	policy: Policy,
	name: Option<Cow<'static, str>>,
	init: Option<F>,
	#[cfg(feature = "events")]
	event_capacity: usize,
	_marker: PhantomData<fn() -> Result<T, E>>,
}

impl<T, E, F> ProviderBuilder<T, E, F>
where
	F: Fn() -> Result<T, E>,
{
	pub fn new() -> Self {
		Self {
			policy: Policy::default(),
			name: None,
			init: None,
			#[cfg(feature = "events")]
			event_capacity: DEFAULT_EVENT_CAPACITY,
			_marker: PhantomData,
		}
	}

	pub fn policy(mut self, policy: Policy) -> Self {
		self.policy = policy;
		self
	}

	pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn init(mut self, init: F) -> Self {
		self.init = Some(init);
		self
	}

	/// Applies every setting from `config`. A missing name keeps the current one.
	pub fn config(mut self, config: ProviderConfig) -> Self {
		self.policy = config.policy;
		if let Some(name) = config.name {
			self.name = Some(Cow::Owned(name));
		}
		#[cfg(feature = "events")]
		{
			self.event_capacity = config.event_capacity;
		}
		self
	}

	#[cfg(feature = "events")]
	pub fn event_capacity(mut self, capacity: usize) -> Self {
		self.event_capacity = capacity;
		self
	}

	/// Builds the provider. An eager provider constructs its instance here.
	pub fn build(self) -> Result<Provider<T, E, F>, ProvideError<E>> {
		let init = self
			.init
			.ok_or_else(|| ProvideError::Builder("init is required".to_string()))?;

		#[cfg(feature = "events")]
		{
			if self.event_capacity == 0 {
				return Err(ProvideError::Builder(
					"event capacity must be greater than zero".to_string(),
				));
			}
		}

		let provider = Provider::with_parts(self.policy, self.name, init);
		#[cfg(feature = "events")]
		let provider = Provider {
			event_capacity: self.event_capacity,
			..provider
		};

		provider.prime()?;
		Ok(provider)
	}
}

impl<T, E, F> Default for ProviderBuilder<T, E, F>
where
	F: Fn() -> Result<T, E>,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<T, E, F> Provider<T, E, F>
where
	F: Fn() -> Result<T, E>,
{
	pub fn builder() -> ProviderBuilder<T, E, F> {
		ProviderBuilder::new()
	}
}
