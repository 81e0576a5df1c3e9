use crate::domain::origin::Origin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
	UseDefault,
	UseFallback,
	/// No eligible processor is healthy; back off and decide again later.
	Defer,
}

impl RouteDecision {
	pub fn origin(&self) -> Option<Origin> {
		match self {
			RouteDecision::UseDefault => Some(Origin::Default),
			RouteDecision::UseFallback => Some(Origin::Fallback),
			RouteDecision::Defer => None,
		}
	}
}

/// Threshold-based escalation from the default processor to the fallback.
///
/// Below `max_retries_before_fallback` failed attempts only the default
/// processor is eligible. From the threshold on the fallback is preferred,
/// with the default still used when it is the only healthy one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingPolicy {
	pub max_retries_before_fallback: u32,
}

impl RoutingPolicy {
	pub fn new(max_retries_before_fallback: u32) -> Self {
		Self {
			max_retries_before_fallback,
		}
	}

	pub fn decide(
		&self,
		attempt_count: u32,
		default_healthy: bool,
		fallback_healthy: bool,
	) -> RouteDecision {
		if attempt_count < self.max_retries_before_fallback {
			return if default_healthy {
				RouteDecision::UseDefault
			} else {
				RouteDecision::Defer
			};
		}

		match (fallback_healthy, default_healthy) {
			(true, _) => RouteDecision::UseFallback,
			(false, true) => RouteDecision::UseDefault,
			(false, false) => RouteDecision::Defer,
		}
	}
}

impl Default for RoutingPolicy {
	fn default() -> Self {
		Self::new(3)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_routing_table_below_and_above_threshold() {
		let policy = RoutingPolicy::new(3);

		// (attempts, default_healthy, fallback_healthy, expected)
		let cases = [
			(0, true, true, RouteDecision::UseDefault),
			(2, true, false, RouteDecision::UseDefault),
			(0, false, true, RouteDecision::Defer),
			(2, false, false, RouteDecision::Defer),
			(3, true, true, RouteDecision::UseFallback),
			(3, false, true, RouteDecision::UseFallback),
			(7, true, false, RouteDecision::UseDefault),
			(3, false, false, RouteDecision::Defer),
		];

		for (attempts, default_healthy, fallback_healthy, expected) in cases {
			assert_eq!(
				policy.decide(attempts, default_healthy, fallback_healthy),
				expected,
				"attempts={attempts} default={default_healthy} \
				 fallback={fallback_healthy}"
			);
		}
	}

	#[test]
	fn test_default_healthy_below_threshold_always_uses_default() {
		let policy = RoutingPolicy::new(5);

		for attempts in 0..5 {
			for fallback_healthy in [true, false] {
				assert_eq!(
					policy.decide(attempts, true, fallback_healthy),
					RouteDecision::UseDefault
				);
			}
		}
	}

	#[test]
	fn test_zero_threshold_goes_straight_to_fallback() {
		let policy = RoutingPolicy::new(0);

		assert_eq!(policy.decide(0, true, true), RouteDecision::UseFallback);
		assert_eq!(
			RouteDecision::UseFallback.origin(),
			Some(Origin::Fallback)
		);
		assert_eq!(RouteDecision::Defer.origin(), None);
	}
}
