use log::warn;

use crate::domain::payment::{Payment, PaymentValidationError};
use crate::domain::queue::{Message, Queue};
use crate::use_cases::dto::CreatePaymentCommand;

#[derive(Clone)]
pub struct CreatePaymentUseCase<Q: Queue<Payment>> {
	payment_queue: Q,
}

impl<Q: Queue<Payment>> CreatePaymentUseCase<Q> {
	pub fn new(payment_queue: Q) -> Self {
		Self { payment_queue }
	}

	/// Validates and enqueues a payment without waiting on any processor.
	///
	/// Only validation can fail. A payment submitted after the queue was
	/// closed for shutdown is dropped with a warning.
	pub fn execute(
		&self,
		command: CreatePaymentCommand,
	) -> Result<(), PaymentValidationError> {
		let payment = Payment::new(command.correlation_id, command.amount)?;

		if let Err(e) = self
			.payment_queue
			.push(Message::with(command.correlation_id, payment))
		{
			warn!("Dropping payment {}: {e}", command.correlation_id);
		}

		Ok(())
	}
}
