use std::time::Duration;

use serde::Deserialize;

use crate::domain::backoff::BackoffPolicy;
use crate::domain::payment_router::RoutingPolicy;

fn default_server_addr() -> String {
	"0.0.0.0:9999".to_string()
}

fn default_ledger_server_addr() -> String {
	"0.0.0.0:9998".to_string()
}

fn default_server_keepalive() -> u64 {
	60
}

fn default_ledger_capacity() -> usize {
	1_000_000
}

fn default_worker_multiplier() -> usize {
	2
}

fn default_health_check_interval_ms() -> u64 {
	5000
}

fn default_health_check_timeout_ms() -> u64 {
	2000
}

fn default_processor_timeout_ms() -> u64 {
	5000
}

fn default_max_retries_before_fallback() -> u32 {
	3
}

fn default_retry_base_delay_ms() -> u64 {
	100
}

fn default_retry_max_delay_ms() -> u64 {
	1000
}

fn default_retry_cap_bits() -> u32 {
	5
}

fn default_batch_size() -> usize {
	100
}

fn default_batch_flush_interval_ms() -> u64 {
	50
}

fn default_dead_letter_capacity() -> usize {
	10_000
}

fn default_shutdown_grace_ms() -> u64 {
	10_000
}

/// Gateway settings, read from `APP_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
	pub default_payment_processor_url:  String,
	pub fallback_payment_processor_url: String,
	#[serde(default = "default_server_addr")]
	pub server_addr: String,
	#[serde(default = "default_server_keepalive")]
	pub server_keepalive: u64,
	/// Base URL of the ledger service. Without it the ledger runs in-process.
	#[serde(default)]
	pub ledger_url: Option<String>,
	#[serde(default = "default_ledger_capacity")]
	pub ledger_capacity: usize,
	#[serde(default = "default_worker_multiplier")]
	pub worker_multiplier: usize,
	#[serde(default = "default_health_check_interval_ms")]
	pub health_check_interval_ms: u64,
	#[serde(default = "default_health_check_timeout_ms")]
	pub health_check_timeout_ms: u64,
	#[serde(default = "default_processor_timeout_ms")]
	pub processor_timeout_ms: u64,
	#[serde(default = "default_max_retries_before_fallback")]
	pub max_retries_before_fallback: u32,
	#[serde(default = "default_retry_base_delay_ms")]
	pub retry_base_delay_ms: u64,
	#[serde(default = "default_retry_max_delay_ms")]
	pub retry_max_delay_ms: u64,
	#[serde(default = "default_retry_cap_bits")]
	pub retry_cap_bits: u32,
	/// Unset means payments are retried until accepted.
	#[serde(default)]
	pub max_retry_duration_ms: Option<u64>,
	#[serde(default = "default_batch_size")]
	pub batch_size: usize,
	#[serde(default = "default_batch_flush_interval_ms")]
	pub batch_flush_interval_ms: u64,
	#[serde(default = "default_dead_letter_capacity")]
	pub dead_letter_capacity: usize,
	/// How long shutdown waits for workers to drain the intake queue.
	#[serde(default = "default_shutdown_grace_ms")]
	pub shutdown_grace_ms: u64,
}

impl Config {
	pub fn load() -> Result<Self, config::ConfigError> {
		let config_builder = config::Config::builder()
			.add_source(config::Environment::with_prefix("APP"))
			.build()?;

		config_builder.try_deserialize()
	}

	pub fn worker_count(&self) -> usize {
		let parallelism = std::thread::available_parallelism()
			.map(|n| n.get())
			.unwrap_or(1);
		(parallelism * self.worker_multiplier).max(1)
	}

	pub fn routing_policy(&self) -> RoutingPolicy {
		RoutingPolicy::new(self.max_retries_before_fallback)
	}

	pub fn backoff_policy(&self) -> BackoffPolicy {
		BackoffPolicy::new(
			Duration::from_millis(self.retry_base_delay_ms),
			Duration::from_millis(self.retry_max_delay_ms),
			self.retry_cap_bits,
		)
	}

	pub fn max_retry_duration(&self) -> Option<Duration> {
		self.max_retry_duration_ms.map(Duration::from_millis)
	}

	pub fn health_check_interval(&self) -> Duration {
		Duration::from_millis(self.health_check_interval_ms)
	}

	pub fn health_check_timeout(&self) -> Duration {
		Duration::from_millis(self.health_check_timeout_ms)
	}

	pub fn processor_timeout(&self) -> Duration {
		Duration::from_millis(self.processor_timeout_ms)
	}

	pub fn batch_flush_interval(&self) -> Duration {
		Duration::from_millis(self.batch_flush_interval_ms)
	}

	pub fn shutdown_grace(&self) -> Duration {
		Duration::from_millis(self.shutdown_grace_ms)
	}
}

/// Ledger service settings, read from `LEDGER_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct LedgerConfig {
	#[serde(default = "default_ledger_server_addr")]
	pub server_addr:      String,
	#[serde(default = "default_server_keepalive")]
	pub server_keepalive: u64,
	#[serde(default = "default_ledger_capacity")]
	pub ledger_capacity:  usize,
}

impl LedgerConfig {
	pub fn load() -> Result<Self, config::ConfigError> {
		let config_builder = config::Config::builder()
			.add_source(config::Environment::with_prefix("LEDGER"))
			.build()?;

		config_builder.try_deserialize()
	}
}
