//! Error types for the credential model

use thiserror::Error;

/// Result type alias using CredentialError
pub type Result<T> = std::result::Result<T, CredentialError>;

/// Errors raised by the credential model itself (no I/O involved)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// One or more required issuance fields were absent or empty.
    ///
    /// The display text is the exact message returned to callers in the
    /// `error` envelope, so it must not change.
    #[error("missing required fields")]
    MissingFields {
        /// Wire names of the fields that failed the presence check
        fields: Vec<&'static str>,
    },

    /// Verification was called without a credential ID
    #[error("Credential Id is required")]
    MissingCredentialId,
}

impl CredentialError {
    /// Names of the missing fields, if this is a validation failure
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            CredentialError::MissingFields { fields } => fields,
            CredentialError::MissingCredentialId => &[],
        }
    }
}
