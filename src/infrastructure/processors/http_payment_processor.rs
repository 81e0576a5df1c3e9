use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::health_status::ProcessorHealth;
use crate::domain::payment::ProcessorSubmission;
use crate::domain::payment_processor::{PaymentProcessorClient, ProcessorError};

#[derive(Debug, Serialize)]
struct PaymentProcessorRequest {
	#[serde(rename = "correlationId")]
	correlation_id: Uuid,
	amount:         f64,
	#[serde(rename = "requestedAt", with = "time::serde::rfc3339")]
	requested_at:   OffsetDateTime,
}

impl From<&ProcessorSubmission> for PaymentProcessorRequest {
	fn from(submission: &ProcessorSubmission) -> Self {
		Self {
			correlation_id: submission.correlation_id,
			amount:         submission.amount.as_decimal(),
			requested_at:   submission.requested_at,
		}
	}
}

/// HTTP payment processor exposing `/payments` and
/// `/payments/service-health`.
#[derive(Clone)]
pub struct HttpPaymentProcessor {
	base_url:        String,
	http_client:     Client,
	request_timeout: Duration,
}

impl HttpPaymentProcessor {
	pub fn new(
		base_url: impl Into<String>,
		http_client: Client,
		request_timeout: Duration,
	) -> Self {
		let base_url = base_url.into().trim_end_matches('/').to_string();
		Self {
			base_url,
			http_client,
			request_timeout,
		}
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}
}

fn map_reqwest_error(e: reqwest::Error) -> ProcessorError {
	if e.is_timeout() {
		ProcessorError::Timeout
	} else if e.is_decode() {
		ProcessorError::InvalidResponse {
			message: e.to_string(),
		}
	} else {
		ProcessorError::Transport {
			message: e.to_string(),
		}
	}
}

#[async_trait]
impl PaymentProcessorClient for HttpPaymentProcessor {
	async fn submit(
		&self,
		submission: &ProcessorSubmission,
	) -> Result<(), ProcessorError> {
		let response = self
			.http_client
			.post(format!("{}/payments", self.base_url))
			.timeout(self.request_timeout)
			.json(&PaymentProcessorRequest::from(submission))
			.send()
			.await
			.map_err(map_reqwest_error)?;

		if response.status().is_success() {
			Ok(())
		} else {
			Err(ProcessorError::Rejected {
				status: response.status().as_u16(),
			})
		}
	}

	async fn health(&self) -> Result<ProcessorHealth, ProcessorError> {
		let response = self
			.http_client
			.get(format!("{}/payments/service-health", self.base_url))
			.timeout(self.request_timeout)
			.send()
			.await
			.map_err(map_reqwest_error)?;

		if !response.status().is_success() {
			return Err(ProcessorError::Rejected {
				status: response.status().as_u16(),
			});
		}

		response
			.json::<ProcessorHealth>()
			.await
			.map_err(map_reqwest_error)
	}
}
