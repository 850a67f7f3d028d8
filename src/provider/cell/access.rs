/* src/provider/cell/access.rs */

use std::sync::Arc;

use super::super::{Policy, ProvideError};
use super::Provider;

impl<T, E, F> Provider<T, E, F>
where
	F: Fn() -> Result<T, E>,
{
	/// Returns the shared instance, constructing it on first access.
	///
	/// Every successful call returns a handle to the same allocation, except
	/// under [`Policy::Unsynchronized`] with concurrent first accesses.
	///
	/// A failed construction is not recorded: the error is returned and the
	/// next call tries again.
	pub fn get_instance(&self) -> Result<Arc<T>, ProvideError<E>> {
		match self.policy {
			Policy::Unsynchronized => self.get_unsynchronized(),
			Policy::Synchronized => self.get_synchronized(),
			// An eager provider is always published; the first check hits.
			Policy::Eager | Policy::DoubleChecked => self.get_double_checked(),
		}
	}

	fn get_unsynchronized(&self) -> Result<Arc<T>, ProvideError<E>> {
		if let Some(value) = self.get() {
			return Ok(value);
		}
		self.construct()
	}

	fn get_synchronized(&self) -> Result<Arc<T>, ProvideError<E>> {
		let _lock = self.lock.acquire().ok_or_else(|| self.reentrant())?;
		if let Some(value) = self.get() {
			return Ok(value);
		}
		self.construct()
	}

	fn get_double_checked(&self) -> Result<Arc<T>, ProvideError<E>> {
		if let Some(value) = self.get() {
			return Ok(value);
		}

		let _lock = self.lock.acquire().ok_or_else(|| self.reentrant())?;

		// Another thread may have published while we waited on the lock.
		if let Some(value) = self.get() {
			return Ok(value);
		}
		self.construct()
	}

	fn reentrant(&self) -> ProvideError<E> {
		tracing::warn!(
			provider = %self.name(),
			policy = %self.policy,
			"re-entrant construction refused"
		);
		ProvideError::Reentrant {
			name: self.name().to_string(),
		}
	}
}
