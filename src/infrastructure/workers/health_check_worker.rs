use std::time::Duration;

use log::{debug, warn};
use tokio::time::sleep;

use crate::domain::payment_processor::PaymentProcessorClient;
use crate::use_cases::health_check::HealthCheckUseCase;

/// Probes one processor forever. Each origin gets its own loop so a slow
/// probe never delays the other.
pub async fn health_check_worker<P>(
	health_check_use_case: HealthCheckUseCase<P>,
	interval: Duration,
) where
	P: PaymentProcessorClient,
{
	let origin = health_check_use_case.origin();

	loop {
		match health_check_use_case.execute().await {
			Ok(health) => debug!(
				"{origin} processor health: failing={}, min_response_time={}ms",
				health.failing, health.min_response_time
			),
			Err(e) => warn!(
				"Health check for {origin} processor failed: {e}. Marked as \
				 failing."
			),
		}

		sleep(interval).await;
	}
}
