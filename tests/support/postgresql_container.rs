use log::info;
use testcontainers::core::{ContainerPort, Mount, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};
use uuid::Uuid;

use crate::support::payment_processor_container::TEST_NETWORK;

const DATABASE_NAME: &str = "payment_processor";
const DATABASE_USER: &str = "payment-processor-user";

/// PostgreSQL instance backing one payment processor container.
pub struct ProcessorDatabase {
	/// Npgsql connection string, reachable from inside the test network.
	pub connection_string: String,
	pub container:         ContainerAsync<GenericImage>,
}

impl ProcessorDatabase {
	pub async fn start() -> ProcessorDatabase {
		let container_name = format!("payment-processor-db-{}", Uuid::new_v4());

		let container = GenericImage::new("postgres", "17-alpine")
			.with_wait_for(WaitFor::message_on_stdout(
				"database system is ready to accept connections",
			))
			.with_exposed_port(ContainerPort::Tcp(5432))
			.with_container_name(container_name.clone())
			.with_network(TEST_NETWORK)
			.with_env_var("POSTGRES_DB", DATABASE_NAME)
			.with_env_var("POSTGRES_USER", DATABASE_USER)
			.with_env_var("POSTGRES_PASSWORD", DATABASE_USER)
			.with_mount(Mount::bind_mount(
				format!(
					"{}/tests/fixtures/payment-processor-init.sql",
					env!("CARGO_MANIFEST_DIR")
				),
				"/docker-entrypoint-initdb.d/init.sql".to_string(),
			))
			.start()
			.await
			.unwrap();

		let connection_string = format!(
			"Host={container_name};Port=5432;Database={DATABASE_NAME};\
			 Username={DATABASE_USER};Password={DATABASE_USER};Minimum Pool \
			 Size=5;Maximum Pool Size=10"
		);
		info!("Processor database running as {container_name}");

		ProcessorDatabase {
			connection_string,
			container,
		}
	}
}
