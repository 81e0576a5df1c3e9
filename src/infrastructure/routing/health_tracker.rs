use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::health_status::ProcessorHealth;
use crate::domain::origin::Origin;

/// Cached health of both processors.
///
/// Starts fail-closed: a processor counts as failing until a probe says
/// otherwise.
#[derive(Clone, Default)]
pub struct HealthTracker {
	default:  Arc<RwLock<ProcessorHealth>>,
	fallback: Arc<RwLock<ProcessorHealth>>,
}

impl HealthTracker {
	pub fn new() -> Self {
		Self::default()
	}

	fn slot(&self, origin: Origin) -> &RwLock<ProcessorHealth> {
		match origin {
			Origin::Default => &self.default,
			Origin::Fallback => &self.fallback,
		}
	}

	pub fn snapshot(&self, origin: Origin) -> ProcessorHealth {
		*self
			.slot(origin)
			.read()
			.unwrap_or_else(PoisonError::into_inner)
	}

	pub fn is_healthy(&self, origin: Origin) -> bool {
		self.snapshot(origin).is_healthy()
	}

	pub fn update(&self, origin: Origin, health: ProcessorHealth) {
		*self
			.slot(origin)
			.write()
			.unwrap_or_else(PoisonError::into_inner) = health;
	}

	pub fn mark_failing(&self, origin: Origin) {
		self.update(origin, ProcessorHealth::FAILING);
	}
}
