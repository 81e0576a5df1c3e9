use std::time::Duration;

use crate::domain::health_status::ProcessorHealth;
use crate::domain::origin::Origin;
use crate::domain::payment_processor::{PaymentProcessorClient, ProcessorError};
use crate::infrastructure::routing::health_tracker::HealthTracker;

/// Probes one processor and stores the verdict in the tracker.
#[derive(Clone)]
pub struct HealthCheckUseCase<P: PaymentProcessorClient> {
	origin:         Origin,
	processor:      P,
	health_tracker: HealthTracker,
	probe_timeout:  Duration,
}

impl<P: PaymentProcessorClient> HealthCheckUseCase<P> {
	pub fn new(
		origin: Origin,
		processor: P,
		health_tracker: HealthTracker,
		probe_timeout: Duration,
	) -> Self {
		Self {
			origin,
			processor,
			health_tracker,
			probe_timeout,
		}
	}

	pub fn origin(&self) -> Origin {
		self.origin
	}

	/// Any probe failure marks the processor as failing.
	pub async fn execute(&self) -> Result<ProcessorHealth, ProcessorError> {
		let probe =
			tokio::time::timeout(self.probe_timeout, self.processor.health()).await;

		match probe {
			Ok(Ok(health)) => {
				self.health_tracker.update(self.origin, health);
				Ok(health)
			}
			Ok(Err(e)) => {
				self.health_tracker.mark_failing(self.origin);
				Err(e)
			}
			Err(_) => {
				self.health_tracker.mark_failing(self.origin);
				Err(ProcessorError::Timeout)
			}
		}
	}
}
