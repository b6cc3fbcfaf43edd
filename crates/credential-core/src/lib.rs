//! # Credential Core
//!
//! Shared data model for the issuance and verification services.
//!
//! ## Key Concepts
//!
//! - **Credential record**: an opaque, write-once record keyed by a
//!   caller-supplied `credentialId`. Not a signed claim.
//! - **Result envelope**: the closed three-state response
//!   (`success` / `already_issued` / `error`) returned by both services.
//! - **Worker identity**: the host/process name stamped onto a record by the
//!   worker that issued it.
//!
//! ## Invariants
//!
//! 1. **Uniqueness**: at most one record exists per `credentialId`
//! 2. **Attribution**: `workerId` is set once, at creation, and never rewritten
//! 3. **Write-once**: records are never updated or deleted

pub mod envelope;
pub mod error;
pub mod types;
pub mod worker;

pub use envelope::{Envelope, Status};
pub use error::{CredentialError, Result};
pub use types::{CredentialFields, CredentialRecord, IssueRequest, NewCredential};
pub use worker::{
    resolve_worker_identity, IdentityResolver, StaticIdentity, WorkerEnv, FALLBACK_WORKER_ID,
    HOSTNAME_VAR,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the library version
pub fn version() -> &'static str {
    VERSION
}
