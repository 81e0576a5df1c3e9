use std::time::Duration;

use log::{error, info, warn};
use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};

use crate::domain::backoff::BackoffPolicy;
use crate::domain::payment::Payment;
use crate::domain::payment_processor::PaymentProcessorClient;
use crate::domain::queue::{Message, Queue};
use crate::domain::repository::LedgerRepository;
use crate::infrastructure::queue::dead_letter_queue::DeadLetterQueue;
use crate::use_cases::process_payment::{PaymentOutcome, ProcessPaymentUseCase};

#[derive(Debug, Clone, Copy)]
pub struct RetrySettings {
	pub backoff:            BackoffPolicy,
	/// `None` keeps retrying until a processor accepts the payment.
	pub max_retry_duration: Option<Duration>,
}

fn retry_window_exceeded(payment: &Payment, max: Option<Duration>) -> bool {
	match (max, payment.requested_at) {
		(Some(max), Some(requested_at)) => {
			OffsetDateTime::now_utc() - requested_at > max
		}
		_ => false,
	}
}

pub async fn payment_processing_worker<Q, P, L>(
	queue: Q,
	process_payment_use_case: ProcessPaymentUseCase<P, L>,
	dead_letters: DeadLetterQueue,
	settings: RetrySettings,
) where
	Q: Queue<Payment> + Clone,
	P: PaymentProcessorClient + Clone,
	L: LedgerRepository + Clone,
{
	while let Some(message) = queue.pop().await {
		let Message {
			id,
			body: mut payment,
		} = message;

		let attempts = match process_payment_use_case.execute(&mut payment).await {
			PaymentOutcome::Processed(_) => continue,
			PaymentOutcome::Retry { attempts } => attempts,
		};

		if retry_window_exceeded(&payment, settings.max_retry_duration) {
			error!(
				"Payment {id} still unprocessed after {attempts} attempts. \
				 Moving it to the dead-letter queue."
			);
			process_payment_use_case.retry_state().clear(&id);
			dead_letters.push(payment);
			continue;
		}

		sleep(settings.backoff.delay_for(attempts)).await;

		if let Err(e) = queue.push(Message::with(id, payment.clone())) {
			error!(
				"Failed to re-queue payment {id}: {e}. \
				 Moving it to the dead-letter queue."
			);
			process_payment_use_case.retry_state().clear(&id);
			dead_letters.push(payment);
		}
	}

	info!("Payment queue closed. Worker stopping.");
}

pub fn spawn_payment_workers<Q, P, L>(
	worker_count: usize,
	queue: Q,
	process_payment_use_case: ProcessPaymentUseCase<P, L>,
	dead_letters: DeadLetterQueue,
	settings: RetrySettings,
) -> Vec<JoinHandle<()>>
where
	Q: Queue<Payment> + Clone,
	P: PaymentProcessorClient + Clone,
	L: LedgerRepository + Clone,
{
	info!("Starting {worker_count} payment processing workers...");
	(0..worker_count)
		.map(|_| {
			tokio::spawn(payment_processing_worker(
				queue.clone(),
				process_payment_use_case.clone(),
				dead_letters.clone(),
				settings,
			))
		})
		.collect()
}

/// Waits for the payment workers to finish, up to `grace`.
///
/// The intake queue must already be closed, otherwise the workers never
/// stop. Returns `false` if the grace period ran out first.
pub async fn drain_payment_workers(
	workers: Vec<JoinHandle<()>>,
	grace: Duration,
) -> bool {
	let joined = timeout(grace, async {
		for worker in workers {
			if let Err(e) = worker.await {
				error!("Payment worker ended abnormally: {e}");
			}
		}
	})
	.await;

	if joined.is_err() {
		warn!("Payment workers still busy after {grace:?}. Giving up on them.");
		return false;
	}
	true
}
