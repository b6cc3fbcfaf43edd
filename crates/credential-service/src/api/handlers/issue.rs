//! Credential Issuance Handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use credential_core::{CredentialRecord, Envelope, IssueRequest, Status};
use std::sync::Arc;
use tracing::warn;

use crate::api::error::ApiError;
use crate::api::state::AppState;

/// Map an issuance outcome to its response code
///
/// Only a fresh issuance is `201 Created`; a duplicate and a validation
/// failure are both conflicts.
pub fn issuance_status_code(status: Status) -> StatusCode {
    match status {
        Status::Success => StatusCode::CREATED,
        Status::AlreadyIssued | Status::Error => StatusCode::CONFLICT,
    }
}

/// Issue a credential
///
/// POST /credentials/issue
///
/// A request without a JSON body is treated as an empty submission and fails
/// validation like any other incomplete request. Unparseable JSON is a 400.
pub async fn issue_credential(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<IssueRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<CredentialRecord>>), ApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => IssueRequest::default(),
        Err(rejection) => {
            warn!(error = %rejection, "Malformed issuance payload");
            return Err(ApiError::malformed_issuance(rejection.body_text()));
        }
    };

    let envelope = state
        .issuance
        .issue(request)
        .await
        .map_err(ApiError::issuance)?;

    Ok((issuance_status_code(envelope.status), Json(envelope)))
}
