use derive_more::derive::{Display, Error};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::money::Cents;

#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum LedgerError {
	#[display("range start is after range end")]
	InvalidRange,
	#[display("ledger events need a positive amount and a real timestamp")]
	InvalidEvent,
	#[display("ledger is unavailable: {message}")]
	Unavailable { message: String },
}

/// A confirmed payment as stored by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct LedgerEvent {
	#[serde(rename = "amountCents")]
	pub amount:       Cents,
	#[serde(rename = "requestedAt", with = "time::serde::rfc3339")]
	pub requested_at: OffsetDateTime,
}

impl LedgerEvent {
	pub fn new(
		amount: Cents,
		requested_at: OffsetDateTime,
	) -> Result<Self, LedgerError> {
		let event = Self {
			amount,
			requested_at,
		};
		event.validate()?;
		Ok(event)
	}

	pub fn validate(&self) -> Result<(), LedgerError> {
		if !self.amount.is_positive() ||
			self.requested_at == OffsetDateTime::UNIX_EPOCH
		{
			return Err(LedgerError::InvalidEvent);
		}
		Ok(())
	}
}

/// Inclusive time window for summary queries. A missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
	pub from: Option<OffsetDateTime>,
	pub to:   Option<OffsetDateTime>,
}

impl TimeRange {
	pub fn new(
		from: Option<OffsetDateTime>,
		to: Option<OffsetDateTime>,
	) -> Result<Self, LedgerError> {
		if let (Some(from), Some(to)) = (from, to) &&
			from > to
		{
			return Err(LedgerError::InvalidRange);
		}
		Ok(Self { from, to })
	}

	pub fn is_unbounded(&self) -> bool {
		self.from.is_none() && self.to.is_none()
	}

	pub fn contains(&self, instant: OffsetDateTime) -> bool {
		self.from.is_none_or(|from| instant >= from) &&
			self.to.is_none_or(|to| instant <= to)
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SummaryOrigin {
	#[serde(rename = "totalRequests")]
	pub total_requests: u64,
	#[serde(rename = "totalAmountCents")]
	pub total_amount:   Cents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerMetrics {
	pub count:           usize,
	pub capacity:        usize,
	pub is_empty:        bool,
	pub is_full:         bool,
	pub discarded_count: u64,
}
