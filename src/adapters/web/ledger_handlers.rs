//! Routes of the standalone ledger service. Amounts travel as integer cents.

use actix_web::{HttpResponse, Responder, ResponseError, get, post, web};
use log::{debug, info, warn};

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::PaymentsSummaryFilter;
use crate::domain::ledger::{LedgerEvent, TimeRange};
use crate::domain::origin::Origin;
use crate::domain::repository::LedgerRepository;
use crate::infrastructure::persistence::in_memory_ledger_repository::InMemoryLedgerRepository;

type LedgerData = web::Data<InMemoryLedgerRepository>;

#[post("/payments/{origin}")]
pub async fn append_payment(
	origin: web::Path<String>,
	event: web::Json<LedgerEvent>,
	ledger: LedgerData,
) -> impl Responder {
	let origin = match origin.parse::<Origin>() {
		Ok(origin) => origin,
		Err(e) => return ApiError::from(e).error_response(),
	};

	match ledger.append(origin, event.into_inner()).await {
		Ok(()) => HttpResponse::Created().finish(),
		Err(e) => {
			warn!("Rejected {origin} ledger event: {e}");
			ApiError::from(e).error_response()
		}
	}
}

#[post("/payments/{origin}/batch")]
pub async fn append_payments(
	origin: web::Path<String>,
	events: web::Json<Vec<LedgerEvent>>,
	ledger: LedgerData,
) -> impl Responder {
	let origin = match origin.parse::<Origin>() {
		Ok(origin) => origin,
		Err(e) => return ApiError::from(e).error_response(),
	};

	let events = events.into_inner();
	let count = events.len();
	match ledger.append_batch(origin, events).await {
		Ok(()) => {
			debug!("Appended {count} {origin} ledger events");
			HttpResponse::Created().finish()
		}
		Err(e) => {
			warn!("Rejected batch of {count} {origin} ledger events: {e}");
			ApiError::from(e).error_response()
		}
	}
}

#[get("/summary/{origin}")]
pub async fn summary(
	origin: web::Path<String>,
	filter: web::Query<PaymentsSummaryFilter>,
	ledger: LedgerData,
) -> impl Responder {
	let origin = match origin.parse::<Origin>() {
		Ok(origin) => origin,
		Err(e) => return ApiError::from(e).error_response(),
	};

	let result = match TimeRange::new(filter.from, filter.to) {
		Ok(range) => ledger.summary(origin, range).await,
		Err(e) => Err(e),
	};

	match result {
		Ok(summary) => HttpResponse::Ok().json(summary),
		Err(e) => ApiError::from(e).error_response(),
	}
}

#[post("/purge-payments")]
pub async fn purge(ledger: LedgerData) -> impl Responder {
	match ledger.purge().await {
		Ok(()) => {
			info!("Ledger purged");
			HttpResponse::Ok().finish()
		}
		Err(e) => ApiError::from(e).error_response(),
	}
}

#[get("/metrics/{origin}")]
pub async fn metrics(origin: web::Path<String>, ledger: LedgerData) -> impl Responder {
	let origin = match origin.parse::<Origin>() {
		Ok(origin) => origin,
		Err(e) => return ApiError::from(e).error_response(),
	};

	match ledger.metrics(origin).await {
		Ok(metrics) => HttpResponse::Ok().json(metrics),
		Err(e) => ApiError::from(e).error_response(),
	}
}

/// Registers every ledger service route.
pub fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(append_payment)
		.service(append_payments)
		.service(summary)
		.service(purge)
		.service(metrics);
}
