use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, error, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::sync::{Mutex, Notify};

use crate::domain::ledger::LedgerEvent;
use crate::domain::origin::Origin;
use crate::domain::payment::ProcessorSubmission;
use crate::domain::repository::LedgerRepository;

struct OriginBuffer {
	sender:   UnboundedSender<LedgerEvent>,
	receiver: Mutex<UnboundedReceiver<LedgerEvent>>,
	pending:  AtomicUsize,
	full:     Notify,
}

impl OriginBuffer {
	fn new() -> Self {
		let (sender, receiver) = unbounded_channel();
		Self {
			sender,
			receiver: Mutex::new(receiver),
			pending: AtomicUsize::new(0),
			full: Notify::new(),
		}
	}
}

struct Inner<L> {
	repository: L,
	batch_size: usize,
	default:    OriginBuffer,
	fallback:   OriginBuffer,
}

/// Collects confirmed payments per origin and hands them to the ledger in
/// bulk.
///
/// `record` never waits. A flush is due when an origin's pending count
/// reaches `batch_size`, or when the flush worker's timer fires.
pub struct BatchWriter<L: LedgerRepository> {
	inner: Arc<Inner<L>>,
}

impl<L: LedgerRepository> Clone for BatchWriter<L> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<L: LedgerRepository> BatchWriter<L> {
	pub fn new(repository: L, batch_size: usize) -> Self {
		Self {
			inner: Arc::new(Inner {
				repository,
				batch_size: batch_size.max(1),
				default: OriginBuffer::new(),
				fallback: OriginBuffer::new(),
			}),
		}
	}

	fn buffer(&self, origin: Origin) -> &OriginBuffer {
		match origin {
			Origin::Default => &self.inner.default,
			Origin::Fallback => &self.inner.fallback,
		}
	}

	pub fn batch_size(&self) -> usize {
		self.inner.batch_size
	}

	pub fn pending(&self, origin: Origin) -> usize {
		self.buffer(origin).pending.load(Ordering::Acquire)
	}

	pub fn record(&self, origin: Origin, submission: &ProcessorSubmission) {
		let buffer = self.buffer(origin);
		let event = LedgerEvent {
			amount:       submission.amount,
			requested_at: submission.requested_at,
		};

		// Counted before the send so a concurrent flush never takes more
		// records than were counted.
		let pending = buffer.pending.fetch_add(1, Ordering::AcqRel) + 1;
		if buffer.sender.send(event).is_err() {
			buffer.pending.fetch_sub(1, Ordering::AcqRel);
			error!(
				"Batch buffer for {origin} is closed; dropping ledger record for \
				 {}",
				submission.correlation_id
			);
			return;
		}

		if pending >= self.inner.batch_size {
			buffer.full.notify_one();
		}
	}

	/// Resolves once `origin` has a full batch waiting.
	pub async fn batch_ready(&self, origin: Origin) {
		let buffer = self.buffer(origin);
		let notified = buffer.full.notified();
		if self.pending(origin) >= self.inner.batch_size {
			return;
		}
		notified.await;
	}

	/// Writes up to one batch for `origin` and returns how many records left
	/// the buffer.
	///
	/// A failed bulk write is retried record by record. Records that still
	/// fail are logged and dropped: the processor already captured the
	/// payment, only the audit entry is lost.
	pub async fn flush(&self, origin: Origin) -> usize {
		let buffer = self.buffer(origin);
		let batch = {
			let mut receiver = buffer.receiver.lock().await;
			let mut batch = Vec::with_capacity(self.inner.batch_size);
			while batch.len() < self.inner.batch_size {
				match receiver.try_recv() {
					Ok(event) => batch.push(event),
					Err(_) => break,
				}
			}
			batch
		};

		if batch.is_empty() {
			return 0;
		}

		let flushed = batch.len();
		buffer.pending.fetch_sub(flushed, Ordering::AcqRel);

		match self
			.inner
			.repository
			.append_batch(origin, batch.clone())
			.await
		{
			Ok(()) => {
				debug!("Flushed {flushed} {origin} ledger records");
			}
			Err(e) => {
				warn!(
					"Bulk write of {flushed} {origin} ledger records failed: {e}. \
					 Writing them one by one."
				);
				for event in batch {
					if let Err(e) = self.inner.repository.append(origin, event).await
					{
						error!("Dropping {origin} ledger record: {e}");
					}
				}
			}
		}

		flushed
	}

	/// Flushes until the buffer for `origin` is empty.
	pub async fn flush_all(&self, origin: Origin) -> usize {
		let mut total = 0;
		loop {
			let flushed = self.flush(origin).await;
			total += flushed;
			if flushed < self.inner.batch_size {
				return total;
			}
		}
	}
}
