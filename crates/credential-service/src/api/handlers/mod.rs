//! API request handlers

pub mod issue;
pub mod verify;

pub use issue::{issue_credential, issuance_status_code};
pub use verify::{verification_status_code, verify_credential, verify_without_id};
