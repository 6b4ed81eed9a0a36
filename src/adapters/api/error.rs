//! API error mapping.
//!
//! Converts ledger rejections into HTTP status codes with a small JSON
//! body (`{"error": "...", "message": "..."}`).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::domain::error::LedgerError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("{0}")]
    Unavailable(&'static str),

    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ApiError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Ledger(LedgerError::InvalidInput(_) | LedgerError::EmptyEventName) => {
                StatusCode::BAD_REQUEST
            }
            Self::Ledger(LedgerError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Ledger(
                LedgerError::InsufficientBalance { .. } | LedgerError::AlreadySettled(_),
            ) => StatusCode::CONFLICT,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn code(&self) -> &'static str {
        match self {
            Self::Ledger(LedgerError::InvalidInput(_)) => "invalid_input",
            Self::Ledger(LedgerError::EmptyEventName) => "empty_event_name",
            Self::Ledger(LedgerError::InsufficientBalance { .. }) => "insufficient_balance",
            Self::Ledger(LedgerError::NotFound(_)) => "not_found",
            Self::Ledger(LedgerError::AlreadySettled(_)) => "already_settled",
            Self::Unavailable(_) => "unavailable",
            Self::Storage(_) => "storage",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.code(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
