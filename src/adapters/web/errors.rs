use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, error};
use derive_more::derive::{Display, Error};
use serde::Serialize;

use crate::domain::ledger::LedgerError;
use crate::domain::origin::UnknownOrigin;
use crate::domain::payment::PaymentValidationError;

#[derive(Serialize)]
struct ErrorResponse {
	#[serde(rename = "statusCode")]
	status_code: u16,
	error:       String,
	message:     String,
}

#[derive(Debug, Display, Error, PartialEq)]
pub enum ApiError {
	#[display("Request data is invalid.")]
	BadClientDataError,
	#[display("No such payment origin.")]
	UnknownOriginError,
	#[display("The ledger is unavailable.")]
	LedgerUnavailableError,
	#[display("Internal server error.")]
	InternalServerError,
}

impl ApiError {
	pub fn name(&self) -> String {
		match self {
			ApiError::BadClientDataError => "Bad request".to_string(),
			ApiError::UnknownOriginError => "Not Found".to_string(),
			ApiError::LedgerUnavailableError => "Service Unavailable".to_string(),
			ApiError::InternalServerError => "Internal Server Error".to_string(),
		}
	}
}

impl error::ResponseError for ApiError {
	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code())
			.content_type(ContentType::json())
			.json(ErrorResponse {
				status_code: self.status_code().as_u16(),
				error:       self.to_string(),
				message:     self.name(),
			})
	}

	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::BadClientDataError => StatusCode::BAD_REQUEST,
			ApiError::UnknownOriginError => StatusCode::NOT_FOUND,
			ApiError::LedgerUnavailableError => StatusCode::SERVICE_UNAVAILABLE,
			ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<LedgerError> for ApiError {
	fn from(e: LedgerError) -> Self {
		match e {
			LedgerError::InvalidRange | LedgerError::InvalidEvent => {
				ApiError::BadClientDataError
			}
			LedgerError::Unavailable { .. } => ApiError::LedgerUnavailableError,
		}
	}
}

impl From<UnknownOrigin> for ApiError {
	fn from(_: UnknownOrigin) -> Self {
		ApiError::UnknownOriginError
	}
}

impl From<PaymentValidationError> for ApiError {
	fn from(_: PaymentValidationError) -> Self {
		ApiError::BadClientDataError
	}
}
