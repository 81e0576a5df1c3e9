use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::ledger::{LedgerMetrics, SummaryOrigin};
use crate::domain::payment::Payment;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CreatePaymentCommand {
	pub correlation_id: Uuid,
	pub amount:         f64,
}

#[derive(Debug, Clone, Default)]
pub struct GetPaymentSummaryQuery {
	pub from: Option<OffsetDateTime>,
	pub to:   Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PaymentSummaryResult {
	#[serde(rename = "totalRequests")]
	pub total_requests: u64,
	#[serde(rename = "totalAmount")]
	pub total_amount:   f64,
}

impl From<SummaryOrigin> for PaymentSummaryResult {
	fn from(summary: SummaryOrigin) -> Self {
		Self {
			total_requests: summary.total_requests,
			total_amount:   summary.total_amount.as_decimal(),
		}
	}
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PaymentsSummaryResponse {
	pub default:  PaymentSummaryResult,
	pub fallback: PaymentSummaryResult,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsMetricsResponse {
	pub default:                LedgerMetrics,
	pub fallback:               LedgerMetrics,
	pub pending_retries:        usize,
	pub dead_letters:           usize,
	pub dead_letters_discarded: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeadLetterEntry {
	pub correlation_id: Uuid,
	pub amount:         f64,
	#[serde(with = "time::serde::rfc3339::option")]
	pub requested_at:   Option<OffsetDateTime>,
}

impl From<Payment> for DeadLetterEntry {
	fn from(payment: Payment) -> Self {
		Self {
			correlation_id: payment.correlation_id,
			amount:         payment.amount.as_decimal(),
			requested_at:   payment.requested_at,
		}
	}
}
