use serde::{Deserialize, Serialize};

/// Latest health verdict reported by a payment processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProcessorHealth {
	pub failing:           bool,
	#[serde(rename = "minResponseTime")]
	pub min_response_time: u64,
}

impl ProcessorHealth {
	pub const FAILING: ProcessorHealth = ProcessorHealth {
		failing:           true,
		min_response_time: 0,
	};

	pub fn is_healthy(&self) -> bool {
		!self.failing
	}
}

impl Default for ProcessorHealth {
	fn default() -> Self {
		Self::FAILING
	}
}
