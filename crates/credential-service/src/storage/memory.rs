//! In-memory storage backend
//!
//! Default storage implementation using an in-memory hashmap.
//! Suitable for development and single-instance deployments.
//! Data is lost on restart.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::info;
use uuid::Uuid;

use credential_core::{CredentialRecord, NewCredential};

use super::{CredentialStore, StorageError};

/// In-memory credential store implementation
#[derive(Debug, Default)]
pub struct MemoryStore {
    credentials: RwLock<HashMap<String, CredentialRecord>>,
}

impl MemoryStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> StorageError {
    StorageError::Database("credential store lock poisoned".into())
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_key(
        &self,
        credential_id: &str,
    ) -> Result<Option<CredentialRecord>, StorageError> {
        let credentials = self.credentials.read().map_err(poisoned)?;
        Ok(credentials.get(credential_id).cloned())
    }

    async fn insert(&self, credential: NewCredential) -> Result<CredentialRecord, StorageError> {
        let mut credentials = self.credentials.write().map_err(poisoned)?;

        // Check and insert under the same write lock
        match credentials.entry(credential.credential_id.clone()) {
            Entry::Occupied(entry) => Err(StorageError::AlreadyExists(entry.key().clone())),
            Entry::Vacant(entry) => {
                let record = credential.into_record(Uuid::new_v4(), Utc::now());
                info!(
                    credential_id = %record.credential_id,
                    worker_id = %record.worker_id,
                    "Stored credential record"
                );
                entry.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn count(&self) -> Result<usize, StorageError> {
        let credentials = self.credentials.read().map_err(poisoned)?;
        Ok(credentials.len())
    }
}
