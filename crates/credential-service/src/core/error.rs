use credential_core::CredentialError;
use thiserror::Error;

use crate::storage::StorageError;

/// Failure that is not a business outcome.
///
/// Business outcomes (validation failure, duplicate, not found) come back as
/// envelopes. This type covers the two things that don't: a caller breaking
/// the contract, and the store failing.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ServiceError {
    /// True when the request itself was malformed rather than the store failing
    pub fn is_caller_error(&self) -> bool {
        matches!(self, ServiceError::Credential(_))
    }
}
