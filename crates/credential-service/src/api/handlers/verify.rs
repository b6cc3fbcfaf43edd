//! Credential Verification Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use credential_core::{CredentialRecord, Envelope, Status};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::state::AppState;

/// Map a verification outcome to its response code
pub fn verification_status_code(status: Status) -> StatusCode {
    match status {
        Status::Success => StatusCode::OK,
        Status::AlreadyIssued | Status::Error => StatusCode::NOT_FOUND,
    }
}

/// Verify a credential by ID
///
/// GET /credentials/verify/{id}
pub async fn verify_credential(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Envelope<CredentialRecord>>), ApiError> {
    verify(&state, Some(&id)).await
}

/// Verification without an ID
///
/// GET /credentials/verify
pub async fn verify_without_id(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<Envelope<CredentialRecord>>), ApiError> {
    verify(&state, None).await
}

async fn verify(
    state: &AppState,
    credential_id: Option<&str>,
) -> Result<(StatusCode, Json<Envelope<CredentialRecord>>), ApiError> {
    let envelope = state
        .verification
        .verify(credential_id)
        .await
        .map_err(ApiError::verification)?;

    Ok((verification_status_code(envelope.status), Json(envelope)))
}
