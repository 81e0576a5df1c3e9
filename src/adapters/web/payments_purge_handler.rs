use actix_web::{HttpResponse, Responder, ResponseError, post, web};
use log::{error, info};

use crate::adapters::web::errors::ApiError;
use crate::domain::repository::SharedLedgerRepository;
use crate::use_cases::purge_payments::PurgePaymentsUseCase;

#[post("/purge-payments")]
pub async fn payments_purge(
	purge_use_case: web::Data<PurgePaymentsUseCase<SharedLedgerRepository>>,
) -> impl Responder {
	info!("Received request to purge payments");
	match purge_use_case.execute().await {
		Ok(()) => {
			info!("Payments purged successfully");
			HttpResponse::Ok().finish()
		}
		Err(e) => {
			error!("Failed to purge payments: {e}");
			ApiError::from(e).error_response()
		}
	}
}
