use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use log::info;
use reqwest::Client;

pub mod domain {
	pub mod backoff;
	pub mod health_status;
	pub mod ledger;
	pub mod money;
	pub mod origin;
	pub mod payment;
	pub mod payment_processor;
	pub mod payment_router;
	pub mod queue;
	pub mod repository;
}

pub mod use_cases {
	pub mod create_payment;
	pub mod dto;
	pub mod get_payment_metrics;
	pub mod get_payment_summary;
	pub mod health_check;
	pub mod process_payment;
	pub mod purge_payments;
}

pub mod infrastructure {
	pub mod batch {
		pub mod batch_writer;
	}
	pub mod config {
		pub mod settings;
	}
	pub mod persistence {
		pub mod http_ledger_repository;
		pub mod in_memory_ledger_repository;
		pub mod ledger;
	}
	pub mod processors {
		pub mod http_payment_processor;
	}
	pub mod queue {
		pub mod dead_letter_queue;
		pub mod in_memory_payment_queue;
	}
	pub mod routing {
		pub mod health_tracker;
		pub mod retry_state;
	}
	pub mod workers {
		pub mod batch_flush_worker;
		pub mod health_check_worker;
		pub mod payment_processor_worker;
	}
}

pub mod adapters {
	pub mod web {
		pub mod errors;
		pub mod handlers;
		pub mod ledger_handlers;
		pub mod payments_handler;
		pub mod payments_metrics_handler;
		pub mod payments_purge_handler;
		pub mod payments_summary_handler;
		pub mod schema;
	}
}

use crate::adapters::web::handlers::{
	ledger_routes, payments, payments_dead_letters, payments_metrics,
	payments_purge, payments_summary,
};
use crate::domain::origin::Origin;
use crate::domain::repository::SharedLedgerRepository;
use crate::infrastructure::batch::batch_writer::BatchWriter;
use crate::infrastructure::config::settings::{Config, LedgerConfig};
use crate::infrastructure::persistence::http_ledger_repository::HttpLedgerRepository;
use crate::infrastructure::persistence::in_memory_ledger_repository::InMemoryLedgerRepository;
use crate::infrastructure::processors::http_payment_processor::HttpPaymentProcessor;
use crate::infrastructure::queue::dead_letter_queue::DeadLetterQueue;
use crate::infrastructure::queue::in_memory_payment_queue::PaymentQueue;
use crate::infrastructure::routing::health_tracker::HealthTracker;
use crate::infrastructure::routing::retry_state::RetryState;
use crate::infrastructure::workers::batch_flush_worker::batch_flush_worker;
use crate::infrastructure::workers::health_check_worker::health_check_worker;
use crate::infrastructure::workers::payment_processor_worker::{
	RetrySettings, drain_payment_workers, spawn_payment_workers,
};
use crate::use_cases::create_payment::CreatePaymentUseCase;
use crate::use_cases::get_payment_metrics::GetPaymentMetricsUseCase;
use crate::use_cases::get_payment_summary::GetPaymentSummaryUseCase;
use crate::use_cases::health_check::HealthCheckUseCase;
use crate::use_cases::process_payment::ProcessPaymentUseCase;
use crate::use_cases::purge_payments::PurgePaymentsUseCase;

const LEDGER_JSON_LIMIT: usize = 4 * 1024 * 1024;

pub async fn run(config: Arc<Config>) -> std::io::Result<()> {
	let http_client = Client::builder()
		.pool_idle_timeout(Duration::from_secs(config.server_keepalive))
		.build()
		.map_err(std::io::Error::other)?;

	let ledger_repo: SharedLedgerRepository = match &config.ledger_url {
		Some(ledger_url) => {
			info!("Using ledger service at {ledger_url}");
			Arc::new(HttpLedgerRepository::new(
				ledger_url.as_str(),
				http_client.clone(),
			))
		}
		None => {
			info!(
				"Using in-process ledger with capacity {}",
				config.ledger_capacity
			);
			Arc::new(InMemoryLedgerRepository::new(config.ledger_capacity))
		}
	};

	let default_processor = HttpPaymentProcessor::new(
		config.default_payment_processor_url.as_str(),
		http_client.clone(),
		config.processor_timeout(),
	);
	let fallback_processor = HttpPaymentProcessor::new(
		config.fallback_payment_processor_url.as_str(),
		http_client.clone(),
		config.processor_timeout(),
	);

	let payment_queue = PaymentQueue::new();
	let health_tracker = HealthTracker::new();
	let retry_state = RetryState::new();
	let dead_letters =
		DeadLetterQueue::with_capacity(config.dead_letter_capacity);
	let batch_writer = BatchWriter::new(ledger_repo.clone(), config.batch_size);

	for (origin, processor) in [
		(Origin::Default, default_processor.clone()),
		(Origin::Fallback, fallback_processor.clone()),
	] {
		info!("Starting {origin} health check and batch flush workers...");
		tokio::spawn(health_check_worker(
			HealthCheckUseCase::new(
				origin,
				processor,
				health_tracker.clone(),
				config.health_check_timeout(),
			),
			config.health_check_interval(),
		));
		tokio::spawn(batch_flush_worker(
			batch_writer.clone(),
			origin,
			config.batch_flush_interval(),
		));
	}

	let process_payment_use_case = ProcessPaymentUseCase::new(
		default_processor,
		fallback_processor,
		health_tracker,
		batch_writer.clone(),
		retry_state.clone(),
		config.routing_policy(),
		config.processor_timeout(),
	);

	let payment_workers = spawn_payment_workers(
		config.worker_count(),
		payment_queue.clone(),
		process_payment_use_case,
		dead_letters.clone(),
		RetrySettings {
			backoff:            config.backoff_policy(),
			max_retry_duration: config.max_retry_duration(),
		},
	);

	let create_payment_use_case = CreatePaymentUseCase::new(payment_queue.clone());
	let get_payment_summary_use_case =
		GetPaymentSummaryUseCase::new(ledger_repo.clone());
	let purge_payments_use_case = PurgePaymentsUseCase::new(ledger_repo.clone());
	let get_payment_metrics_use_case =
		GetPaymentMetricsUseCase::new(ledger_repo, retry_state, dead_letters);

	info!("Starting Actix-Web server on {}...", config.server_addr);
	HttpServer::new(move || {
		App::new()
			.app_data(web::Data::new(create_payment_use_case.clone()))
			.app_data(web::Data::new(get_payment_summary_use_case.clone()))
			.app_data(web::Data::new(purge_payments_use_case.clone()))
			.app_data(web::Data::new(get_payment_metrics_use_case.clone()))
			.service(payments)
			.service(payments_summary)
			.service(payments_purge)
			.service(payments_metrics)
			.service(payments_dead_letters)
	})
	.keep_alive(Duration::from_secs(config.server_keepalive))
	.bind(config.server_addr.as_str())?
	.run()
	.await?;

	info!("Server stopped. Draining the intake queue...");
	payment_queue.close();
	drain_payment_workers(payment_workers, config.shutdown_grace()).await;

	info!("Flushing buffered ledger records...");
	for origin in Origin::ALL {
		batch_writer.flush_all(origin).await;
	}

	Ok(())
}

pub async fn run_ledger(config: Arc<LedgerConfig>) -> std::io::Result<()> {
	let ledger = InMemoryLedgerRepository::new(config.ledger_capacity);

	info!(
		"Starting ledger service on {} with capacity {}...",
		config.server_addr, config.ledger_capacity
	);
	HttpServer::new(move || {
		App::new()
			.app_data(web::Data::new(ledger.clone()))
			.app_data(web::JsonConfig::default().limit(LEDGER_JSON_LIMIT))
			.configure(ledger_routes)
	})
	.keep_alive(Duration::from_secs(config.server_keepalive))
	.bind(config.server_addr.as_str())?
	.run()
	.await
}
