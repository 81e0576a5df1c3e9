use std::sync::Arc;

use payment_gateway::infrastructure::config::settings::LedgerConfig;
use payment_gateway::run_ledger;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(
		env_logger::Env::default().default_filter_or("info"),
	)
	.init();

	let config =
		Arc::new(LedgerConfig::load().expect("Failed to load ledger configuration"));
	run_ledger(config).await
}
