use std::time::Duration;

use payment_gateway::infrastructure::processors::http_payment_processor::HttpPaymentProcessor;
use reqwest::Client;
use testcontainers::core::wait::HttpWaitStrategy;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

use crate::support::postgresql_container::ProcessorDatabase;

pub const TEST_NETWORK: &str = "payment-gateway-test";

const PROCESSOR_IMAGE: &str = "zanfranceschi/payment-processor";
const PROCESSOR_TAG: &str = "amd64-20250707101540";

/// A real payment processor with its own database.
pub struct ProcessorContainer {
	pub url:       String,
	pub container: ContainerAsync<GenericImage>,
	pub database:  ProcessorDatabase,
}

impl ProcessorContainer {
	pub async fn start(transaction_fee: f64) -> ProcessorContainer {
		let database = ProcessorDatabase::start().await;

		let container = GenericImage::new(PROCESSOR_IMAGE, PROCESSOR_TAG)
			.with_wait_for(WaitFor::http(
				HttpWaitStrategy::new("/")
					.with_expected_status_code(200_u16),
			))
			.with_exposed_port(ContainerPort::Tcp(8080))
			.with_network(TEST_NETWORK)
			.with_env_var(
				"DB_CONNECTION_STRING",
				database.connection_string.clone(),
			)
			.with_env_var("TRANSACTION_FEE", transaction_fee.to_string())
			.with_env_var("RATE_LIMIT_SECONDS", "5")
			.with_env_var("INITIAL_TOKEN", "123")
			.start()
			.await
			.unwrap();

		let host = container.get_host().await.unwrap();
		let port = container.get_host_port_ipv4(8080).await.unwrap();

		ProcessorContainer {
			url: format!("http://{host}:{port}"),
			container,
			database,
		}
	}

	pub fn client(&self, timeout: Duration) -> HttpPaymentProcessor {
		HttpPaymentProcessor::new(self.url.as_str(), Client::new(), timeout)
	}
}
