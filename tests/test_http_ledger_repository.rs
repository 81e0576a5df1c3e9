use std::net::SocketAddr;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use payment_gateway::adapters::web::handlers::ledger_routes;
use payment_gateway::domain::ledger::{LedgerError, LedgerEvent, TimeRange};
use payment_gateway::domain::money::Cents;
use payment_gateway::domain::origin::Origin;
use payment_gateway::domain::repository::LedgerRepository;
use payment_gateway::infrastructure::persistence::http_ledger_repository::HttpLedgerRepository;
use payment_gateway::infrastructure::persistence::in_memory_ledger_repository::InMemoryLedgerRepository;
use reqwest::Client;
use time::macros::datetime;

async fn start_ledger_service(
	ledger: InMemoryLedgerRepository,
) -> (SocketAddr, ServerHandle) {
	let server = HttpServer::new(move || {
		App::new()
			.app_data(web::Data::new(ledger.clone()))
			.configure(ledger_routes)
	})
	.workers(1)
	.bind(("127.0.0.1", 0))
	.unwrap();

	let addr = server.addrs()[0];
	let server = server.run();
	let handle = server.handle();
	actix_web::rt::spawn(server);

	(addr, handle)
}

fn event(cents: i64, second: u8) -> LedgerEvent {
	let at = datetime!(2025-07-15 12:00:00 UTC) +
		time::Duration::seconds(i64::from(second));
	LedgerEvent::new(Cents::new(cents), at).unwrap()
}

#[actix_web::test]
async fn test_round_trip_through_ledger_service() {
	let ledger = InMemoryLedgerRepository::new(100);
	let (addr, handle) = start_ledger_service(ledger.clone()).await;
	let repository = HttpLedgerRepository::new(format!("http://{addr}/"), Client::new());

	repository
		.append_batch(Origin::Default, vec![event(1990, 0), event(1, 1)])
		.await
		.unwrap();
	repository
		.append(Origin::Fallback, event(50042, 2))
		.await
		.unwrap();

	let everything = repository
		.summary(Origin::Default, TimeRange::default())
		.await
		.unwrap();
	assert_eq!(everything.total_requests, 2);
	assert_eq!(everything.total_amount, Cents::new(1991));

	let window = TimeRange::new(
		Some(datetime!(2025-07-15 12:00:01 UTC)),
		Some(datetime!(2025-07-15 12:00:02 UTC)),
	)
	.unwrap();
	let windowed = repository.summary(Origin::Default, window).await.unwrap();
	assert_eq!(windowed.total_requests, 1);
	assert_eq!(windowed.total_amount, Cents::new(1));

	let metrics = repository.metrics(Origin::Fallback).await.unwrap();
	assert_eq!(metrics.count, 1);

	repository.purge().await.unwrap();
	assert!(ledger.ledger(Origin::Default).metrics().is_empty);
	assert!(ledger.ledger(Origin::Fallback).metrics().is_empty);

	handle.stop(true).await;
}

#[actix_web::test]
async fn test_rejections_map_to_ledger_errors() {
	let (addr, handle) =
		start_ledger_service(InMemoryLedgerRepository::new(10)).await;
	let repository = HttpLedgerRepository::new(format!("http://{addr}"), Client::new());

	let invalid = LedgerEvent {
		amount:       Cents::new(0),
		requested_at: datetime!(2025-07-15 12:00:00 UTC),
	};
	assert_eq!(
		repository.append(Origin::Default, invalid).await,
		Err(LedgerError::InvalidEvent)
	);

	let inverted = TimeRange {
		from: Some(datetime!(2025-07-15 13:00:00 UTC)),
		to:   Some(datetime!(2025-07-15 12:00:00 UTC)),
	};
	assert_eq!(
		repository.summary(Origin::Default, inverted).await,
		Err(LedgerError::InvalidRange)
	);

	handle.stop(true).await;
}

#[actix_web::test]
async fn test_unreachable_ledger_is_unavailable_after_retries() {
	let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
	let addr = listener.local_addr().unwrap();
	drop(listener);

	let repository = HttpLedgerRepository::new(format!("http://{addr}"), Client::new());
	let started = std::time::Instant::now();

	let result = repository
		.summary(Origin::Default, TimeRange::default())
		.await;

	assert!(matches!(result, Err(LedgerError::Unavailable { .. })));
	assert!(started.elapsed() >= std::time::Duration::from_millis(200));
}
