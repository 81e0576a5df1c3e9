use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use payment_gateway::domain::health_status::ProcessorHealth;
use payment_gateway::domain::payment::ProcessorSubmission;
use payment_gateway::domain::payment_processor::{
	PaymentProcessorClient, ProcessorError,
};

struct Inner {
	accepts:      AtomicBool,
	healthy:      AtomicBool,
	reachable:    AtomicBool,
	health_delay: Mutex<Duration>,
	submissions:  Mutex<Vec<ProcessorSubmission>>,
}

/// In-process stand-in for a payment processor. Records every submission
/// it sees, accepted or not.
#[derive(Clone)]
pub struct FakeProcessor {
	inner: Arc<Inner>,
}

impl FakeProcessor {
	fn with(accepts: bool, healthy: bool) -> Self {
		Self {
			inner: Arc::new(Inner {
				accepts:      AtomicBool::new(accepts),
				healthy:      AtomicBool::new(healthy),
				reachable:    AtomicBool::new(true),
				health_delay: Mutex::new(Duration::ZERO),
				submissions:  Mutex::new(Vec::new()),
			}),
		}
	}

	pub fn accepting() -> Self {
		Self::with(true, true)
	}

	pub fn rejecting() -> Self {
		Self::with(false, true)
	}

	pub fn set_accepts(&self, accepts: bool) {
		self.inner.accepts.store(accepts, Ordering::SeqCst);
	}

	pub fn set_healthy(&self, healthy: bool) {
		self.inner.healthy.store(healthy, Ordering::SeqCst);
	}

	pub fn set_reachable(&self, reachable: bool) {
		self.inner.reachable.store(reachable, Ordering::SeqCst);
	}

	pub fn set_health_delay(&self, delay: Duration) {
		*self.inner.health_delay.lock().unwrap() = delay;
	}

	pub fn submissions(&self) -> Vec<ProcessorSubmission> {
		self.inner.submissions.lock().unwrap().clone()
	}

	pub fn submission_count(&self) -> usize {
		self.inner.submissions.lock().unwrap().len()
	}
}

#[async_trait]
impl PaymentProcessorClient for FakeProcessor {
	async fn submit(
		&self,
		submission: &ProcessorSubmission,
	) -> Result<(), ProcessorError> {
		self.inner.submissions.lock().unwrap().push(*submission);

		if !self.inner.reachable.load(Ordering::SeqCst) {
			return Err(ProcessorError::Transport {
				message: "connection refused".to_string(),
			});
		}
		if self.inner.accepts.load(Ordering::SeqCst) {
			Ok(())
		} else {
			Err(ProcessorError::Rejected { status: 500 })
		}
	}

	async fn health(&self) -> Result<ProcessorHealth, ProcessorError> {
		let delay = *self.inner.health_delay.lock().unwrap();
		if !delay.is_zero() {
			tokio::time::sleep(delay).await;
		}

		if !self.inner.reachable.load(Ordering::SeqCst) {
			return Err(ProcessorError::Transport {
				message: "connection refused".to_string(),
			});
		}

		Ok(ProcessorHealth {
			failing:           !self.inner.healthy.load(Ordering::SeqCst),
			min_response_time: 0,
		})
	}
}
