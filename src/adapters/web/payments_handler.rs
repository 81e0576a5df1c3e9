use actix_web::{HttpResponse, Responder, ResponseError, post, web};
use log::{debug, warn};

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::PaymentRequest;
use crate::infrastructure::queue::in_memory_payment_queue::PaymentQueue;
use crate::use_cases::create_payment::CreatePaymentUseCase;
use crate::use_cases::dto::CreatePaymentCommand;

#[post("/payments")]
pub async fn payments(
	payload: web::Json<PaymentRequest>,
	create_payment_use_case: web::Data<CreatePaymentUseCase<PaymentQueue>>,
) -> impl Responder {
	let command = CreatePaymentCommand {
		correlation_id: payload.correlation_id,
		amount:         payload.amount,
	};

	match create_payment_use_case.execute(command) {
		Ok(()) => {
			debug!("Payment received and queued: {}", payload.correlation_id);
			HttpResponse::Accepted().finish()
		}
		Err(e) => {
			warn!("Rejecting payment {}: {e}", payload.correlation_id);
			ApiError::from(e).error_response()
		}
	}
}
