//! Storage abstraction for credential records
//!
//! This module provides a trait-based abstraction over the record store,
//! with an in-memory backend (default) and a PostgreSQL backend behind the
//! `postgres` feature.
//!
//! Both backends enforce uniqueness of `credential_id` themselves. The
//! issuance service reads before it writes, but two concurrent issuers can
//! both pass that read; the store constraint is what keeps the second insert
//! out, reported as [`StorageError::AlreadyExists`].

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::MemoryStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;

use async_trait::async_trait;
use credential_core::{CredentialRecord, NewCredential};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::info;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Credential already exists: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

/// Keyed record store
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait CredentialStore: Send + Sync + Debug {
    /// Look up a record by exact, case-sensitive `credential_id`
    async fn find_by_key(&self, credential_id: &str)
        -> Result<Option<CredentialRecord>, StorageError>;

    /// Persist a new record, assigning its id and timestamps.
    ///
    /// Fails with [`StorageError::AlreadyExists`] if the key is taken.
    async fn insert(&self, credential: NewCredential) -> Result<CredentialRecord, StorageError>;

    /// Number of stored records
    async fn count(&self) -> Result<usize, StorageError>;
}

/// Open the configured backend.
///
/// `None` selects the in-memory store. A database URL requires the
/// `postgres` feature.
pub async fn open_store(
    database_url: Option<&str>,
) -> Result<Arc<dyn CredentialStore>, StorageError> {
    match database_url {
        None => {
            info!("Using in-memory credential store");
            Ok(Arc::new(MemoryStore::new()))
        }
        #[cfg(feature = "postgres")]
        Some(url) => Ok(Arc::new(PostgresStore::new(url).await?)),
        #[cfg(not(feature = "postgres"))]
        Some(_) => Err(StorageError::Connection(
            "DATABASE_URL is set but this build lacks the `postgres` feature".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_store_defaults_to_memory() {
        let store = open_store(None).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[cfg(not(feature = "postgres"))]
    #[tokio::test]
    async fn test_open_store_rejects_url_without_feature() {
        let result = open_store(Some("postgres://localhost/credentials")).await;
        assert!(matches!(result, Err(StorageError::Connection(_))));
    }
}
