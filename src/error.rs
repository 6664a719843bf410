use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::{Local, NaiveDateTime};
use derive_more::Display;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::attendance::sequencer::SequenceError;

/// Every failure a request can surface. Validation variants map to 4xx with
/// the offending detail in the message; collaborator failures stay opaque.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "Employee not found with id: {}", _0)]
    EmployeeNotFound(u64),

    #[display(fmt = "Email '{}' is already registered", _0)]
    DuplicateEmail(String),

    #[display(fmt = "Invalid action '{}'. Must be either PUNCH_IN or PUNCH_OUT", _0)]
    InvalidAction(String),

    #[display(fmt = "{}", _0)]
    InvalidSequence(SequenceError),

    #[display(fmt = "Cannot mark attendance for future timestamp")]
    FutureTimestamp,

    #[display(fmt = "Invalid date '{}'. Expected format yyyyMMdd", _0)]
    InvalidDate(String),

    #[display(fmt = "{}", _0)]
    Validation(String),

    #[display(fmt = "An unexpected error occurred")]
    Storage(anyhow::Error),
}

impl From<SequenceError> for ApiError {
    fn from(reason: SequenceError) -> Self {
        ApiError::InvalidSequence(reason)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(source: anyhow::Error) -> Self {
        ApiError::Storage(source)
    }
}

/// JSON error body, same shape for every failing response.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "2026-03-02T09:00:00", value_type = String, format = "date-time")]
    pub timestamp: NaiveDateTime,
    #[schema(example = 400)]
    pub status: u16,
    #[schema(example = "Bad Request")]
    pub error: String,
    #[schema(example = "Employee already punched in for this day")]
    pub message: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::EmployeeNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DuplicateEmail(_) => StatusCode::CONFLICT,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidAction(_)
            | ApiError::InvalidSequence(_)
            | ApiError::FutureTimestamp
            | ApiError::InvalidDate(_)
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Storage(source) = self {
            error!(error = %source, "request failed on a collaborator");
        }
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorBody {
            timestamp: Local::now().naive_local(),
            status: status.as_u16(),
            error: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message: self.to_string(),
        })
    }
}
