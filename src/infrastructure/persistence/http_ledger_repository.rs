use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use reqwest::{Client, Response, StatusCode};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::domain::ledger::{
	LedgerError, LedgerEvent, LedgerMetrics, SummaryOrigin, TimeRange,
};
use crate::domain::origin::Origin;
use crate::domain::repository::LedgerRepository;

const SUMMARY_ATTEMPTS: usize = 3;
const SUMMARY_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Client for the out-of-process ledger service.
#[derive(Clone)]
pub struct HttpLedgerRepository {
	base_url:    String,
	http_client: Client,
}

impl HttpLedgerRepository {
	pub fn new(base_url: impl Into<String>, http_client: Client) -> Self {
		let base_url = base_url.into().trim_end_matches('/').to_string();
		Self {
			base_url,
			http_client,
		}
	}

	fn unavailable(e: impl std::fmt::Display) -> LedgerError {
		LedgerError::Unavailable {
			message: e.to_string(),
		}
	}

	fn check_status(
		response: Response,
		on_bad_request: LedgerError,
	) -> Result<Response, LedgerError> {
		let status = response.status();
		if status.is_success() {
			Ok(response)
		} else if status == StatusCode::BAD_REQUEST {
			Err(on_bad_request)
		} else {
			Err(Self::unavailable(format!(
				"ledger service answered with status {status}"
			)))
		}
	}

	fn format_bound(bound: OffsetDateTime) -> Result<String, LedgerError> {
		bound.format(&Rfc3339).map_err(Self::unavailable)
	}

	async fn fetch_summary(
		&self,
		origin: Origin,
		query: &[(&str, String)],
	) -> Result<SummaryOrigin, LedgerError> {
		let response = self
			.http_client
			.get(format!("{}/summary/{origin}", self.base_url))
			.query(query)
			.send()
			.await
			.map_err(Self::unavailable)?;

		Self::check_status(response, LedgerError::InvalidRange)?
			.json::<SummaryOrigin>()
			.await
			.map_err(Self::unavailable)
	}
}

#[async_trait]
impl LedgerRepository for HttpLedgerRepository {
	async fn append(
		&self,
		origin: Origin,
		event: LedgerEvent,
	) -> Result<(), LedgerError> {
		let response = self
			.http_client
			.post(format!("{}/payments/{origin}", self.base_url))
			.json(&event)
			.send()
			.await
			.map_err(Self::unavailable)?;

		Self::check_status(response, LedgerError::InvalidEvent).map(|_| ())
	}

	async fn append_batch(
		&self,
		origin: Origin,
		events: Vec<LedgerEvent>,
	) -> Result<(), LedgerError> {
		let response = self
			.http_client
			.post(format!("{}/payments/{origin}/batch", self.base_url))
			.json(&events)
			.send()
			.await
			.map_err(Self::unavailable)?;

		Self::check_status(response, LedgerError::InvalidEvent).map(|_| ())
	}

	async fn summary(
		&self,
		origin: Origin,
		range: TimeRange,
	) -> Result<SummaryOrigin, LedgerError> {
		let mut query = Vec::with_capacity(2);
		if let Some(from) = range.from {
			query.push(("from", Self::format_bound(from)?));
		}
		if let Some(to) = range.to {
			query.push(("to", Self::format_bound(to)?));
		}

		let mut last_error = Self::unavailable("no summary attempt was made");
		for attempt in 1..=SUMMARY_ATTEMPTS {
			match self.fetch_summary(origin, &query).await {
				Ok(summary) => return Ok(summary),
				Err(LedgerError::InvalidRange) => {
					return Err(LedgerError::InvalidRange);
				}
				Err(e) => {
					warn!(
						"Summary query for {origin} failed (attempt \
						 {attempt}/{SUMMARY_ATTEMPTS}): {e}"
					);
					last_error = e;
				}
			}
			if attempt < SUMMARY_ATTEMPTS {
				tokio::time::sleep(SUMMARY_RETRY_DELAY).await;
			}
		}

		Err(last_error)
	}

	async fn purge(&self) -> Result<(), LedgerError> {
		let response = self
			.http_client
			.post(format!("{}/purge-payments", self.base_url))
			.send()
			.await
			.map_err(Self::unavailable)?;

		Self::check_status(response, Self::unavailable("purge was rejected"))
			.map(|_| ())
	}

	async fn metrics(&self, origin: Origin) -> Result<LedgerMetrics, LedgerError> {
		let response = self
			.http_client
			.get(format!("{}/metrics/{origin}", self.base_url))
			.send()
			.await
			.map_err(Self::unavailable)?;

		Self::check_status(response, Self::unavailable("metrics were rejected"))?
			.json::<LedgerMetrics>()
			.await
			.map_err(Self::unavailable)
	}
}
