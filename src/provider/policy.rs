/* src/provider/policy.rs */

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ParsePolicyError;

/// When and under which discipline a provider builds its instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Policy {
	/// Built when the provider is created, before any access.
	Eager,
	/// Built on first access with no synchronization.
	///
	/// Concurrent first accesses may each build an instance. Only sound for
	/// single-threaded use.
	Unsynchronized,
	/// Built on first access; every access holds the lock.
	Synchronized,
	/// Built on first access; the lock is only taken while no instance exists.
	#[default]
	DoubleChecked,
}

impl Policy {
	/// Returns true if the instance is built on first access.
	pub const fn is_lazy(self) -> bool {
		!matches!(self, Policy::Eager)
	}

	/// Returns true if concurrent first accesses build exactly one instance.
	pub const fn is_thread_safe(self) -> bool {
		!matches!(self, Policy::Unsynchronized)
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Policy::Eager => "eager",
			Policy::Unsynchronized => "unsynchronized",
			Policy::Synchronized => "synchronized",
			Policy::DoubleChecked => "double_checked",
		}
	}
}

impl fmt::Display for Policy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Policy {
	type Err = ParsePolicyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"eager" => Ok(Policy::Eager),
			"unsynchronized" | "lazy" => Ok(Policy::Unsynchronized),
			"synchronized" => Ok(Policy::Synchronized),
			"double_checked" | "double-checked" => Ok(Policy::DoubleChecked),
			_ => Err(ParsePolicyError(s.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_accepts_aliases() {
		assert_eq!("lazy".parse::<Policy>().unwrap(), Policy::Unsynchronized);
		assert_eq!(
			" Double-Checked ".parse::<Policy>().unwrap(),
			Policy::DoubleChecked
		);
		assert!("enum".parse::<Policy>().is_err());
	}

	#[test]
	fn test_only_eager_is_not_lazy() {
		assert!(!Policy::Eager.is_lazy());
		assert!(Policy::Unsynchronized.is_lazy());
		assert!(Policy::Synchronized.is_lazy());
		assert!(Policy::DoubleChecked.is_lazy());
		assert!(!Policy::Unsynchronized.is_thread_safe());
	}

	#[test]
	fn test_display_parses_back() {
		for policy in [
			Policy::Eager,
			Policy::Unsynchronized,
			Policy::Synchronized,
			Policy::DoubleChecked,
		] {
			assert_eq!(policy.to_string().parse::<Policy>().unwrap(), policy);
		}
	}
}
