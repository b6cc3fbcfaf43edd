//! Issuance decision logic
//!
//! `issue` is create-if-absent:
//! 1. Reject requests with a missing/empty required field (no store access)
//! 2. Return the stored record as `already_issued` if the key exists
//! 3. Otherwise stamp the worker identity, insert, and return `success`
//!
//! Steps 2 and 3 are a check-then-write and are not atomic. The store's
//! uniqueness constraint catches the losing insert; [`DuplicatePolicy`]
//! decides how that loss is reported.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use credential_core::{CredentialRecord, Envelope, IdentityResolver, IssueRequest};
use tracing::{info, warn};

use super::error::ServiceError;
use crate::storage::{CredentialStore, StorageError};

/// Message returned in the `error` envelope for incomplete requests
pub const MISSING_FIELDS_MESSAGE: &str = "missing required fields";

/// How a uniqueness violation on insert is reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Re-read the winning record and answer `already_issued`
    #[default]
    Resolve,
    /// Propagate the violation as an operational error.
    /// Concurrent issuers of the same new ID may see a failure.
    Surface,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicatePolicy::Resolve => "resolve",
            DuplicatePolicy::Surface => "surface",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "resolve" => Ok(DuplicatePolicy::Resolve),
            "surface" => Ok(DuplicatePolicy::Surface),
            other => Err(format!(
                "unknown duplicate policy '{}', expected 'resolve' or 'surface'",
                other
            )),
        }
    }
}

/// Issues credential records
#[derive(Debug, Clone)]
pub struct IssuanceService {
    store: Arc<dyn CredentialStore>,
    identity: Arc<dyn IdentityResolver>,
    policy: DuplicatePolicy,
}

impl IssuanceService {
    pub fn new(store: Arc<dyn CredentialStore>, identity: Arc<dyn IdentityResolver>) -> Self {
        Self {
            store,
            identity,
            policy: DuplicatePolicy::default(),
        }
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Issue a credential, or return the existing one.
    ///
    /// # Returns
    /// * `Ok(success)` with the newly stored record
    /// * `Ok(already_issued)` with the previously stored record
    /// * `Ok(error)` if a required field is missing
    /// * `Err(ServiceError)` if the store fails
    pub async fn issue(
        &self,
        request: IssueRequest,
    ) -> Result<Envelope<CredentialRecord>, ServiceError> {
        let fields = match request.validate() {
            Ok(fields) => fields,
            Err(err) => {
                warn!(missing = ?err.missing_fields(), "Rejected incomplete issuance request");
                return Ok(Envelope::error(MISSING_FIELDS_MESSAGE));
            }
        };

        if let Some(existing) = self.store.find_by_key(&fields.credential_id).await? {
            info!(
                credential_id = %existing.credential_id,
                worker_id = %existing.worker_id,
                "Credential already issued"
            );
            return Ok(Envelope::already_issued(existing));
        }

        let credential_id = fields.credential_id.clone();
        let worker_id = self.identity.resolve();

        match self.store.insert(fields.issued_by(worker_id)).await {
            Ok(record) => {
                info!(
                    credential_id = %record.credential_id,
                    worker_id = %record.worker_id,
                    "Issued credential"
                );
                Ok(Envelope::success(record))
            }
            Err(StorageError::AlreadyExists(_)) if self.policy == DuplicatePolicy::Resolve => {
                self.resolve_lost_race(&credential_id).await
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Another issuer inserted the same key between our read and our write
    async fn resolve_lost_race(
        &self,
        credential_id: &str,
    ) -> Result<Envelope<CredentialRecord>, ServiceError> {
        warn!(
            credential_id = %credential_id,
            "Concurrent issuance detected, returning stored credential"
        );

        match self.store.find_by_key(credential_id).await? {
            Some(existing) => Ok(Envelope::already_issued(existing)),
            None => Err(StorageError::AlreadyExists(credential_id.to_string()).into()),
        }
    }
}
