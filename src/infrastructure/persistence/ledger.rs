use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::ledger::{LedgerEvent, LedgerMetrics, SummaryOrigin, TimeRange};
use crate::domain::money::Cents;

/// Bounded, concurrently writable store of ledger events for one origin.
///
/// The unfiltered summary is served from lifetime running totals kept in
/// atomics: they grow on every append, are never reduced by eviction, and
/// only go back to zero on purge. Range queries scan the retained events.
///
/// The mutex covers the append-and-evict step with its counter updates,
/// purge, and the snapshot taken before a range scan. Summation happens
/// outside it. The cent total saturates like [`Cents`] addition does.
pub struct Ledger {
	events:         Mutex<VecDeque<LedgerEvent>>,
	capacity:       usize,
	total_requests: AtomicU64,
	total_cents:    AtomicI64,
	discarded:      AtomicU64,
}

impl Ledger {
	pub fn with_capacity(capacity: usize) -> Self {
		let capacity = capacity.max(1);
		Self {
			events: Mutex::new(VecDeque::with_capacity(capacity.min(65_536))),
			capacity,
			total_requests: AtomicU64::new(0),
			total_cents: AtomicI64::new(0),
			discarded: AtomicU64::new(0),
		}
	}

	fn events(&self) -> MutexGuard<'_, VecDeque<LedgerEvent>> {
		self.events.lock().unwrap_or_else(PoisonError::into_inner)
	}

	pub fn append(&self, event: LedgerEvent) {
		let mut events = self.events();
		if events.len() >= self.capacity && events.pop_front().is_some() {
			self.discarded.fetch_add(1, Ordering::Relaxed);
		}
		events.push_back(event);

		// Counters change under the lock, which purge also holds.
		self.total_requests.fetch_add(1, Ordering::Relaxed);
		let amount = event.amount.get();
		let _ = self.total_cents.fetch_update(
			Ordering::Relaxed,
			Ordering::Relaxed,
			|total| Some(total.saturating_add(amount)),
		);
	}

	pub fn append_all<I>(&self, events: I)
	where
		I: IntoIterator<Item = LedgerEvent>,
	{
		for event in events {
			self.append(event);
		}
	}

	pub fn summary(&self, range: TimeRange) -> SummaryOrigin {
		if range.is_unbounded() {
			return SummaryOrigin {
				total_requests: self.total_requests.load(Ordering::Relaxed),
				total_amount:   Cents::new(self.total_cents.load(Ordering::Relaxed)),
			};
		}

		let snapshot: Vec<LedgerEvent> = self.events().iter().copied().collect();

		snapshot
			.iter()
			.filter(|event| range.contains(event.requested_at))
			.fold(SummaryOrigin::default(), |mut summary, event| {
				summary.total_requests += 1;
				summary.total_amount += event.amount;
				summary
			})
	}

	pub fn purge(&self) {
		let mut events = self.events();
		events.clear();
		self.total_requests.store(0, Ordering::Relaxed);
		self.total_cents.store(0, Ordering::Relaxed);
		self.discarded.store(0, Ordering::Relaxed);
	}

	pub fn metrics(&self) -> LedgerMetrics {
		let count = self.events().len();
		LedgerMetrics {
			count,
			capacity: self.capacity,
			is_empty: count == 0,
			is_full: count >= self.capacity,
			discarded_count: self.discarded.load(Ordering::Relaxed),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use time::OffsetDateTime;
	use time::macros::datetime;

	use super::*;

	fn event(cents: i64, requested_at: OffsetDateTime) -> LedgerEvent {
		LedgerEvent::new(Cents::new(cents), requested_at).unwrap()
	}

	fn at(second: i64) -> OffsetDateTime {
		datetime!(2025-07-15 12:00:00 UTC) + time::Duration::seconds(second)
	}

	#[test]
	fn test_append_within_capacity() {
		let ledger = Ledger::with_capacity(10);

		for i in 0..4 {
			ledger.append(event(1000 + i, at(i)));
		}

		let summary = ledger.summary(TimeRange::default());
		assert_eq!(summary.total_requests, 4);
		assert_eq!(summary.total_amount, Cents::new(4006));

		let metrics = ledger.metrics();
		assert_eq!(metrics.count, 4);
		assert!(!metrics.is_empty);
		assert!(!metrics.is_full);
		assert_eq!(metrics.discarded_count, 0);
	}

	#[test]
	fn test_eviction_is_fifo_and_running_totals_are_lifetime() {
		let ledger = Ledger::with_capacity(3);

		for i in 0..5 {
			ledger.append(event(100, at(i)));
		}

		let metrics = ledger.metrics();
		assert_eq!(metrics.count, 3);
		assert!(metrics.is_full);
		assert_eq!(metrics.discarded_count, 2);

		// Unfiltered totals count everything ever recorded.
		let lifetime = ledger.summary(TimeRange::default());
		assert_eq!(lifetime.total_requests, 5);
		assert_eq!(lifetime.total_amount, Cents::new(500));

		// A range covering all time only sees the retained window.
		let window = ledger.summary(TimeRange {
			from: Some(at(-100)),
			to:   Some(at(100)),
		});
		assert_eq!(window.total_requests, 3);

		// The two oldest events are gone.
		let oldest = ledger.summary(TimeRange {
			from: Some(at(0)),
			to:   Some(at(1)),
		});
		assert_eq!(oldest.total_requests, 0);
	}

	#[test]
	fn test_range_query_is_inclusive() {
		let ledger = Ledger::with_capacity(10);
		ledger.append(event(1000, at(1)));
		ledger.append(event(2000, at(2)));
		ledger.append(event(3000, at(3)));

		let first_two = ledger.summary(TimeRange::new(Some(at(1)), Some(at(2))).unwrap());
		assert_eq!(first_two.total_requests, 2);
		assert_eq!(first_two.total_amount.as_decimal(), 30.00);

		let boundary = ledger.summary(TimeRange::new(Some(at(3)), Some(at(3))).unwrap());
		assert_eq!(boundary.total_requests, 1);
		assert_eq!(boundary.total_amount.as_decimal(), 30.00);
	}

	#[test]
	fn test_purge_resets_everything() {
		let ledger = Ledger::with_capacity(2);
		for i in 0..5 {
			ledger.append(event(100, at(i)));
		}

		ledger.purge();

		assert_eq!(ledger.summary(TimeRange::default()), SummaryOrigin::default());
		let metrics = ledger.metrics();
		assert_eq!(metrics.count, 0);
		assert!(metrics.is_empty);
		assert_eq!(metrics.discarded_count, 0);
	}

	#[test]
	fn test_lifetime_total_saturates_instead_of_wrapping() {
		let ledger = Ledger::with_capacity(10);
		let huge = Cents::from_decimal(5e16).unwrap();

		ledger.append(LedgerEvent::new(huge, at(1)).unwrap());
		ledger.append(LedgerEvent::new(huge, at(2)).unwrap());

		let lifetime = ledger.summary(TimeRange::default());
		let window = ledger.summary(TimeRange::new(Some(at(0)), Some(at(3))).unwrap());
		assert_eq!(lifetime.total_requests, 2);
		assert_eq!(lifetime.total_amount, Cents::new(i64::MAX));
		assert_eq!(lifetime.total_amount, window.total_amount);
	}

	#[test]
	fn test_concurrent_appends_and_purges() {
		let ledger = Arc::new(Ledger::with_capacity(1000));
		let writers: Vec<_> = (0..8)
			.map(|_| {
				let ledger = Arc::clone(&ledger);
				std::thread::spawn(move || {
					for i in 0..2000 {
						ledger.append(event(10, at(i)));
					}
				})
			})
			.collect();

		let purger = {
			let ledger = Arc::clone(&ledger);
			std::thread::spawn(move || {
				for _ in 0..50 {
					ledger.purge();
					std::thread::yield_now();
				}
			})
		};

		for writer in writers {
			writer.join().unwrap();
		}
		purger.join().unwrap();

		let metrics = ledger.metrics();
		let summary = ledger.summary(TimeRange::default());
		assert!(metrics.count <= metrics.capacity);
		assert!(summary.total_requests <= 16_000);
		// Purge and append never interleave, so the counters always
		// describe exactly what happened since the last purge.
		assert_eq!(
			summary.total_requests,
			metrics.count as u64 + metrics.discarded_count
		);
		assert_eq!(summary.total_amount.get(), summary.total_requests as i64 * 10);
	}

	#[test]
	fn test_concurrent_appends_keep_exact_totals() {
		let ledger = Arc::new(Ledger::with_capacity(100));
		let writers: Vec<_> = (0..4)
			.map(|_| {
				let ledger = Arc::clone(&ledger);
				std::thread::spawn(move || {
					for i in 0..500 {
						ledger.append(event(25, at(i)));
					}
				})
			})
			.collect();

		for writer in writers {
			writer.join().unwrap();
		}

		let summary = ledger.summary(TimeRange::default());
		assert_eq!(summary.total_requests, 2000);
		assert_eq!(summary.total_amount, Cents::new(50_000));
		assert_eq!(ledger.metrics().discarded_count, 1900);
	}
}
