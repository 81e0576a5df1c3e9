use async_trait::async_trait;
use derive_more::derive::{Display, Error};

use crate::domain::health_status::ProcessorHealth;
use crate::domain::payment::ProcessorSubmission;

#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum ProcessorError {
	#[display("processor rejected the payment with status {status}")]
	Rejected { status: u16 },
	#[display("processor call timed out")]
	Timeout,
	#[display("could not reach processor: {message}")]
	Transport { message: String },
	#[display("processor sent an unexpected response: {message}")]
	InvalidResponse { message: String },
}

/// A downstream payment processor: accepts or rejects submissions and
/// reports its own health.
#[async_trait]
pub trait PaymentProcessorClient: Send + Sync + 'static {
	async fn submit(
		&self,
		submission: &ProcessorSubmission,
	) -> Result<(), ProcessorError>;

	async fn health(&self) -> Result<ProcessorHealth, ProcessorError>;
}
