use std::time::Duration;

/// Exponential backoff with a ceiling:
/// `min(base * 2^min(attempts, cap_bits), max_delay)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
	pub base_delay: Duration,
	pub max_delay:  Duration,
	pub cap_bits:   u32,
}

impl BackoffPolicy {
	pub fn new(base_delay: Duration, max_delay: Duration, cap_bits: u32) -> Self {
		Self {
			base_delay,
			max_delay,
			cap_bits,
		}
	}

	pub fn delay_for(&self, attempts: u32) -> Duration {
		let exponent = attempts.min(self.cap_bits).min(31);
		self.base_delay
			.saturating_mul(1u32 << exponent)
			.min(self.max_delay)
	}
}

impl Default for BackoffPolicy {
	fn default() -> Self {
		Self::new(Duration::from_millis(100), Duration::from_millis(1000), 5)
	}
}
