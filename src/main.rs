use std::sync::Arc;

use payment_gateway::infrastructure::config::settings::Config;
use payment_gateway::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(
		env_logger::Env::default().default_filter_or("info"),
	)
	.init();

	let config = Arc::new(Config::load().expect("Failed to load configuration"));
	run(config).await
}
