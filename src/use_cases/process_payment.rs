use std::time::Duration;

use log::{debug, warn};
use time::OffsetDateTime;

use crate::domain::origin::Origin;
use crate::domain::payment::Payment;
use crate::domain::payment_processor::{PaymentProcessorClient, ProcessorError};
use crate::domain::payment_router::RoutingPolicy;
use crate::domain::repository::LedgerRepository;
use crate::infrastructure::batch::batch_writer::BatchWriter;
use crate::infrastructure::routing::health_tracker::HealthTracker;
use crate::infrastructure::routing::retry_state::RetryState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
	Processed(Origin),
	/// The attempt failed or was deferred; `attempts` counts failures so far.
	Retry { attempts: u32 },
}

/// Runs a single dispatch attempt for a payment.
#[derive(Clone)]
pub struct ProcessPaymentUseCase<P, L>
where
	P: PaymentProcessorClient + Clone,
	L: LedgerRepository + Clone,
{
	default_processor:  P,
	fallback_processor: P,
	health_tracker:     HealthTracker,
	batch_writer:       BatchWriter<L>,
	retry_state:        RetryState,
	routing_policy:     RoutingPolicy,
	call_timeout:       Duration,
}

impl<P, L> ProcessPaymentUseCase<P, L>
where
	P: PaymentProcessorClient + Clone,
	L: LedgerRepository + Clone,
{
	pub fn new(
		default_processor: P,
		fallback_processor: P,
		health_tracker: HealthTracker,
		batch_writer: BatchWriter<L>,
		retry_state: RetryState,
		routing_policy: RoutingPolicy,
		call_timeout: Duration,
	) -> Self {
		Self {
			default_processor,
			fallback_processor,
			health_tracker,
			batch_writer,
			retry_state,
			routing_policy,
			call_timeout,
		}
	}

	pub fn retry_state(&self) -> &RetryState {
		&self.retry_state
	}

	fn processor(&self, origin: Origin) -> &P {
		match origin {
			Origin::Default => &self.default_processor,
			Origin::Fallback => &self.fallback_processor,
		}
	}

	/// Picks a processor and submits the payment to it once.
	///
	/// The first call freezes `requested_at` on the payment. On success the
	/// payment is handed to the batch writer and its retry state dropped.
	pub async fn execute(&self, payment: &mut Payment) -> PaymentOutcome {
		let correlation_id = payment.correlation_id;
		let submission = payment.to_submission(OffsetDateTime::now_utc());
		let attempts = self.retry_state.attempts(&correlation_id);

		let decision = self.routing_policy.decide(
			attempts,
			self.health_tracker.is_healthy(Origin::Default),
			self.health_tracker.is_healthy(Origin::Fallback),
		);

		let Some(origin) = decision.origin() else {
			debug!(
				"No eligible processor for payment {correlation_id} after \
				 {attempts} attempts. Deferring."
			);
			return PaymentOutcome::Retry {
				attempts: self.retry_state.record_failure(correlation_id),
			};
		};

		let result = tokio::time::timeout(
			self.call_timeout,
			self.processor(origin).submit(&submission),
		)
		.await
		.unwrap_or(Err(ProcessorError::Timeout));

		match result {
			Ok(()) => {
				debug!("Payment {correlation_id} processed by {origin} processor.");
				self.batch_writer.record(origin, &submission);
				self.retry_state.clear(&correlation_id);
				PaymentOutcome::Processed(origin)
			}
			Err(e) => {
				let attempts = self.retry_state.record_failure(correlation_id);
				warn!(
					"Payment {correlation_id} failed on {origin} processor \
					 (attempt {attempts}): {e}"
				);
				PaymentOutcome::Retry { attempts }
			}
		}
	}
}
