//! Issuance and verification decision logic

mod error;
mod issuance;
mod verification;

pub use error::ServiceError;
pub use issuance::{DuplicatePolicy, IssuanceService, MISSING_FIELDS_MESSAGE};
pub use verification::{VerificationService, NOT_FOUND_MESSAGE};
