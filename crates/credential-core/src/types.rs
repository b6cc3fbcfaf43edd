//! Credential record types

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{CredentialError, Result};

/// A persisted credential record
///
/// Records are write-once: the store assigns `id`, `created_at` and
/// `updated_at` on insert and nothing rewrites them afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    /// Store-assigned document identifier
    pub id: Uuid,

    /// Caller-supplied natural key (unique, case-sensitive)
    pub credential_id: String,

    /// Holder display name
    pub holder_name: String,

    /// Holder email address (opaque, not format-checked)
    pub holder_email: String,

    /// Free-form credential type label
    pub credential_type: String,

    /// Identity of the worker that issued this record
    pub worker_id: String,

    /// Set by the store on insert
    pub created_at: DateTime<Utc>,

    /// Set by the store on insert
    pub updated_at: DateTime<Utc>,
}

/// Record input handed to the store's `insert`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCredential {
    pub credential_id: String,
    pub holder_name: String,
    pub holder_email: String,
    pub credential_type: String,
    pub worker_id: String,
}

impl NewCredential {
    /// Materialize the stored record with store-assigned metadata
    pub fn into_record(self, id: Uuid, now: DateTime<Utc>) -> CredentialRecord {
        CredentialRecord {
            id,
            credential_id: self.credential_id,
            holder_name: self.holder_name,
            holder_email: self.holder_email,
            credential_type: self.credential_type,
            worker_id: self.worker_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Raw issuance request as submitted by a caller
///
/// Every field is optional on the wire: absent keys and explicit `null`
/// both deserialize to `None`, and [`IssueRequest::validate`] decides.
/// Numbers and booleans are accepted and kept in their string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IssueRequest {
    #[serde(deserialize_with = "scalar_as_string")]
    pub credential_id: Option<String>,
    #[serde(deserialize_with = "scalar_as_string")]
    pub holder_name: Option<String>,
    #[serde(deserialize_with = "scalar_as_string")]
    pub holder_email: Option<String>,
    #[serde(deserialize_with = "scalar_as_string")]
    pub credential_type: Option<String>,
}

/// Deserialize a JSON scalar into its string form; `null` is `None`.
/// Arrays and objects are rejected.
fn scalar_as_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number, boolean or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
            Ok(Some(v.to_owned()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> std::result::Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(ScalarVisitor)
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}

impl IssueRequest {
    /// Build a request with all four fields present
    pub fn new(
        credential_id: impl Into<String>,
        holder_name: impl Into<String>,
        holder_email: impl Into<String>,
        credential_type: impl Into<String>,
    ) -> Self {
        Self {
            credential_id: Some(credential_id.into()),
            holder_name: Some(holder_name.into()),
            holder_email: Some(holder_email.into()),
            credential_type: Some(credential_type.into()),
        }
    }

    /// Check that all required fields are present and non-empty.
    ///
    /// Only presence is checked; values are otherwise passed through as-is.
    pub fn validate(self) -> Result<CredentialFields> {
        let mut missing = Vec::new();
        let credential_id = take_required(self.credential_id, "credentialId", &mut missing);
        let holder_name = take_required(self.holder_name, "holderName", &mut missing);
        let holder_email = take_required(self.holder_email, "holderEmail", &mut missing);
        let credential_type = take_required(self.credential_type, "credentialType", &mut missing);

        match (credential_id, holder_name, holder_email, credential_type) {
            (Some(credential_id), Some(holder_name), Some(holder_email), Some(credential_type)) => {
                Ok(CredentialFields {
                    credential_id,
                    holder_name,
                    holder_email,
                    credential_type,
                })
            }
            _ => Err(CredentialError::MissingFields { fields: missing }),
        }
    }
}

fn take_required(
    value: Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    match value {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            missing.push(name);
            None
        }
    }
}

/// Issuance fields that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialFields {
    pub credential_id: String,
    pub holder_name: String,
    pub holder_email: String,
    pub credential_type: String,
}

impl CredentialFields {
    /// Stamp the fields with the issuing worker's identity
    pub fn issued_by(self, worker_id: impl Into<String>) -> NewCredential {
        NewCredential {
            credential_id: self.credential_id,
            holder_name: self.holder_name,
            holder_email: self.holder_email,
            credential_type: self.credential_type,
            worker_id: worker_id.into(),
        }
    }
}
