//! Result envelope shared by the issuance and verification services
//!
//! Wire shape:
//! ```json
//! { "status": "success",        "data": { ... } }
//! { "status": "already_issued", "data": { ... } }
//! { "status": "error",          "message": "..." }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of an issuance or verification request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    AlreadyIssued,
    Error,
}

impl Status {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::AlreadyIssued => "already_issued",
            Status::Error => "error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-state response envelope
///
/// `data` is present exactly for `success` / `already_issued`, `message`
/// exactly for `error`. The constructors are the only way the services build
/// one, which keeps that pairing intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: Status,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            data: Some(data),
            message: None,
        }
    }

    pub fn already_issued(data: T) -> Self {
        Self {
            status: Status::AlreadyIssued,
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Borrow the payload, if any
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Consume the envelope, returning the payload
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
