use derive_more::derive::{Display, Error};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::money::Cents;

#[derive(Debug, Display, Error, PartialEq)]
pub enum PaymentValidationError {
	#[display("amount must be a positive currency value")]
	InvalidAmount,
}

/// A logical payment travelling through the intake queue.
///
/// `requested_at` stays empty until the first dispatch attempt and is then
/// reused by every retry of the same payment.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Payment {
	pub correlation_id: Uuid,
	pub amount:         Cents,
	#[serde(
		with = "time::serde::rfc3339::option",
		skip_serializing_if = "Option::is_none",
		default
	)]
	pub requested_at:   Option<OffsetDateTime>,
}

impl Payment {
	pub fn new(
		correlation_id: Uuid,
		amount: f64,
	) -> Result<Self, PaymentValidationError> {
		let amount = Cents::from_decimal(amount)
			.filter(|cents| cents.is_positive())
			.ok_or(PaymentValidationError::InvalidAmount)?;

		Ok(Self {
			correlation_id,
			amount,
			requested_at: None,
		})
	}

	/// Builds the downstream submission, stamping `requested_at` only on
	/// the first call.
	pub fn to_submission(&mut self, now: OffsetDateTime) -> ProcessorSubmission {
		let requested_at = *self.requested_at.get_or_insert(now);

		ProcessorSubmission {
			correlation_id: self.correlation_id,
			amount: self.amount,
			requested_at,
		}
	}
}

/// The value sent to a downstream payment processor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessorSubmission {
	pub correlation_id: Uuid,
	pub amount:         Cents,
	pub requested_at:   OffsetDateTime,
}
