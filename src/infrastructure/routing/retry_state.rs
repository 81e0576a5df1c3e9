use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

/// Failed-attempt counters per correlation id.
///
/// An entry appears on the first failure and is removed once the payment
/// is accepted or dead-lettered.
#[derive(Clone, Default)]
pub struct RetryState {
	attempts: Arc<DashMap<Uuid, u32>>,
}

impl RetryState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn attempts(&self, correlation_id: &Uuid) -> u32 {
		self.attempts
			.get(correlation_id)
			.map(|entry| *entry)
			.unwrap_or(0)
	}

	/// Records one more failed attempt and returns the new count.
	pub fn record_failure(&self, correlation_id: Uuid) -> u32 {
		let mut entry = self.attempts.entry(correlation_id).or_insert(0);
		let attempts = entry.saturating_add(1);
		*entry = attempts;
		attempts
	}

	pub fn clear(&self, correlation_id: &Uuid) {
		self.attempts.remove(correlation_id);
	}

	pub fn len(&self) -> usize {
		self.attempts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.attempts.is_empty()
	}
}
