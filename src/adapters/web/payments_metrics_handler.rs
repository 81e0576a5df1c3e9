use actix_web::{HttpResponse, Responder, ResponseError, get, web};
use log::error;

use crate::adapters::web::errors::ApiError;
use crate::domain::repository::SharedLedgerRepository;
use crate::use_cases::get_payment_metrics::GetPaymentMetricsUseCase;

#[get("/payments-metrics")]
pub async fn payments_metrics(
	get_payment_metrics_use_case: web::Data<
		GetPaymentMetricsUseCase<SharedLedgerRepository>,
	>,
) -> impl Responder {
	match get_payment_metrics_use_case.execute().await {
		Ok(metrics) => HttpResponse::Ok().json(metrics),
		Err(e) => {
			error!("Error reading ledger metrics: {e}");
			ApiError::from(e).error_response()
		}
	}
}

#[get("/payments-dead-letters")]
pub async fn payments_dead_letters(
	get_payment_metrics_use_case: web::Data<
		GetPaymentMetricsUseCase<SharedLedgerRepository>,
	>,
) -> impl Responder {
	HttpResponse::Ok().json(get_payment_metrics_use_case.dead_letters())
}
