//! Verification lookup

use std::sync::Arc;

use credential_core::{CredentialError, CredentialRecord, Envelope};
use tracing::{info, warn};

use super::error::ServiceError;
use crate::storage::CredentialStore;

/// Message returned in the `error` envelope when no record matches
pub const NOT_FOUND_MESSAGE: &str = "Credential not found";

/// Looks up issued credentials by ID
#[derive(Debug, Clone)]
pub struct VerificationService {
    store: Arc<dyn CredentialStore>,
}

impl VerificationService {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Verify a credential by exact, case-sensitive ID.
    ///
    /// A missing or empty ID is a contract violation and is returned as
    /// `Err` without touching the store. An unknown ID is a normal
    /// `error` envelope.
    pub async fn verify(
        &self,
        credential_id: Option<&str>,
    ) -> Result<Envelope<CredentialRecord>, ServiceError> {
        let credential_id = credential_id
            .filter(|id| !id.is_empty())
            .ok_or(CredentialError::MissingCredentialId)?;

        match self.store.find_by_key(credential_id).await? {
            Some(record) => {
                info!(
                    credential_id = %record.credential_id,
                    worker_id = %record.worker_id,
                    "Verified credential"
                );
                Ok(Envelope::success(record))
            }
            None => {
                warn!(credential_id = %credential_id, "Credential not found");
                Ok(Envelope::error(NOT_FOUND_MESSAGE))
            }
        }
    }
}
