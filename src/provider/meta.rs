/* src/provider/meta.rs */

use std::time::Instant;

use super::Policy;

/// Metadata recorded when an instance is published.
#[derive(Debug, Clone)]
pub struct Meta {
	/// Timestamp when the instance was constructed.
	pub created_at: Instant,
	/// Policy in effect at construction.
	pub policy: Policy,
	/// Number of successful constructions including this one.
	///
	/// Always 1 for a provider unless an unsynchronized race built
	/// duplicates. In a registry, the position in registration order.
	pub sequence: u64,
}
