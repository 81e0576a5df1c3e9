#![allow(dead_code)]

pub mod fake_processor;
pub mod payment_processor_container;
pub mod postgresql_container;

use std::time::Duration;

/// Polls `condition` every few milliseconds until it holds or `within`
/// elapses. Returns whether it ever held.
pub async fn eventually<F>(within: Duration, mut condition: F) -> bool
where
	F: FnMut() -> bool,
{
	let deadline = tokio::time::Instant::now() + within;
	loop {
		if condition() {
			return true;
		}
		if tokio::time::Instant::now() >= deadline {
			return false;
		}
		tokio::time::sleep(Duration::from_millis(5)).await;
	}
}
