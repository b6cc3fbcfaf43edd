//! Credential Issuance & Verification Service
//!
//! Two logical services over one record store:
//! - **Issuance** creates a credential record the first time an ID is seen,
//!   stamped with the identity of the worker that handled it, and answers
//!   `already_issued` with the stored record on every later attempt
//! - **Verification** looks a record up by exact ID
//!
//! Both answer with the three-state envelope from `credential_core`.
//!
//! ## API Endpoints
//!
//! - `GET /health` - Liveness check with worker identity
//! - `POST /credentials/issue` - Issue a credential (issuance / combined role)
//! - `GET /credentials/verify/{id}` - Verify a credential (verification / combined role)
//!
//! ## Response codes
//!
//! | Route | `success` | `already_issued` / `error` | failure |
//! |---|---|---|---|
//! | issue | 201 | 409 | 400 |
//! | verify | 200 | 404 | 400 |

pub mod api;
pub mod config;
pub mod core;
pub mod storage;

pub use api::create_router;
pub use api::state::AppState;
pub use config::{ConfigError, ServiceConfig, ServiceRole};
pub use core::{
    DuplicatePolicy, IssuanceService, ServiceError, VerificationService, MISSING_FIELDS_MESSAGE,
    NOT_FOUND_MESSAGE,
};
pub use storage::{open_store, CredentialStore, MemoryStore, StorageError};
#[cfg(feature = "postgres")]
pub use storage::PostgresStore;
