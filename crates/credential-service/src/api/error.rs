//! API error types and responses
//!
//! Operational failures and caller contract violations never leak detail to
//! the client: they render as a generic `error` envelope with 400, and the
//! cause is logged. Caller faults log at `warn`, store faults at `error`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use credential_core::Envelope;
use thiserror::Error;
use tracing::{error, warn};

use crate::core::ServiceError;

/// API error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Error issuing credential")]
    Issuance { detail: String, caller_fault: bool },

    #[error("Error verifying credential")]
    Verification { detail: String, caller_fault: bool },
}

impl ApiError {
    /// Issuance failed inside the service
    pub fn issuance(err: ServiceError) -> Self {
        ApiError::Issuance {
            caller_fault: err.is_caller_error(),
            detail: err.to_string(),
        }
    }

    /// Issuance body could not be parsed
    pub fn malformed_issuance(detail: impl Into<String>) -> Self {
        ApiError::Issuance {
            detail: detail.into(),
            caller_fault: true,
        }
    }

    /// Verification failed inside the service
    pub fn verification(err: ServiceError) -> Self {
        ApiError::Verification {
            caller_fault: err.is_caller_error(),
            detail: err.to_string(),
        }
    }

    /// Underlying cause, for logs only
    pub fn detail(&self) -> &str {
        match self {
            ApiError::Issuance { detail, .. } | ApiError::Verification { detail, .. } => detail,
        }
    }

    /// True when the request broke the contract rather than the store failing
    pub fn is_caller_fault(&self) -> bool {
        match self {
            ApiError::Issuance { caller_fault, .. }
            | ApiError::Verification { caller_fault, .. } => *caller_fault,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.is_caller_fault() {
            warn!(error = %self, detail = %self.detail(), "Rejected request");
        } else {
            error!(error = %self, detail = %self.detail(), "Request failed");
        }

        let body: Envelope<()> = Envelope::error(self.to_string());
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
