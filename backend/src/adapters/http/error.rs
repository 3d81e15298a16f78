//! Error → HTTP response mapping.
//!
//! Every failure is rendered as `{"errors": [CODE]}`. Only the code leaves
//! the process; `Internal` details are logged here and replaced with the
//! generic code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::foundation::{DomainError, ErrorKind};

use super::dto::ErrorEnvelope;

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        status_for(self.0.kind)
    }
}

/// Status table.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        kind if kind.is_token_error() => StatusCode::UNAUTHORIZED,
        ErrorKind::DataNotFound => StatusCode::NOT_FOUND,
        ErrorKind::RequestTimeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self.0.kind {
            ErrorKind::Internal => {
                tracing::error!(error = %self.0, details = ?self.0.details, "Internal error");
            }
            kind if kind.is_client_error() => {
                tracing::debug!(error = %self.0, status = status.as_u16(), "Request failed");
            }
            _ => tracing::warn!(error = %self.0, status = status.as_u16(), "Request not completed"),
        }

        let body = ErrorEnvelope::new(self.0.kind.code());
        (status, Json(body)).into_response()
    }
}
