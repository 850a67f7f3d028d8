/* src/provider/error.rs */

#[derive(Debug, thiserror::Error)]
pub enum ProvideError<E> {
	/// The construction function returned an error. Nothing was recorded,
	/// so the next access retries.
	#[error("failed to construct instance: {name}")]
	Construct {
		name: String,
		#[source]
		source: E,
	},
	/// The construction function asked its own provider for the instance
	/// it is building.
	#[error("re-entrant construction of {name}")]
	Reentrant { name: String },
	/// An instance of this type is already registered.
	#[error("instance already initialized: {name}")]
	AlreadyInitialized { name: String },
	#[error("builder error: {0}")]
	Builder(String),
}

impl<E> ProvideError<E> {
	/// Returns the construction error, if that is what this is.
	pub fn into_source(self) -> Option<E> {
		match self {
			ProvideError::Construct { source, .. } => Some(source),
			_ => None,
		}
	}
}

/// Unrecognized policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown initialization policy: {0}")]
pub struct ParsePolicyError(pub String);
