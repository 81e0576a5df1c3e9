use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::warn;

use crate::domain::payment::Payment;

const DEFAULT_CAPACITY: usize = 10_000;

/// Payments the workers gave up on, kept for inspection through the
/// `/payments-dead-letters` endpoint.
///
/// The list is bounded. Once full, the oldest entry is dropped to make
/// room and counted in [`DeadLetterQueue::discarded`].
#[derive(Clone)]
pub struct DeadLetterQueue {
	inner:    Arc<Mutex<DeadLetters>>,
	capacity: usize,
}

#[derive(Default)]
struct DeadLetters {
	payments:  VecDeque<Payment>,
	discarded: u64,
}

impl Default for DeadLetterQueue {
	fn default() -> Self {
		Self::with_capacity(DEFAULT_CAPACITY)
	}
}

impl DeadLetterQueue {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			inner:    Arc::new(Mutex::new(DeadLetters::default())),
			capacity: capacity.max(1),
		}
	}

	fn lock(&self) -> MutexGuard<'_, DeadLetters> {
		self.inner.lock().unwrap_or_else(PoisonError::into_inner)
	}

	pub fn push(&self, payment: Payment) {
		let mut dead_letters = self.lock();
		let dropped = if dead_letters.payments.len() >= self.capacity {
			dead_letters.payments.pop_front()
		} else {
			None
		};
		if let Some(dropped) = dropped {
			warn!(
				"Dead-letter queue full. Dropping payment {}.",
				dropped.correlation_id
			);
			dead_letters.discarded += 1;
		}
		dead_letters.payments.push_back(payment);
	}

	pub fn len(&self) -> usize {
		self.lock().payments.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Entries dropped because the queue was full.
	pub fn discarded(&self) -> u64 {
		self.lock().discarded
	}

	/// Copies the retained payments, oldest first.
	pub fn snapshot(&self) -> Vec<Payment> {
		self.lock().payments.iter().cloned().collect()
	}
}
