//! Worker identity resolution
//!
//! Every issued record is stamped with the identity of the worker that
//! created it. Resolution is a pure function over a [`WorkerEnv`] snapshot so
//! callers (and tests) control exactly what it sees.
//!
//! Precedence:
//! 1. `HOSTNAME` environment override (set by container orchestrators)
//! 2. The system-reported hostname
//! 3. [`FALLBACK_WORKER_ID`]

use std::fmt::Debug;

/// Identity used when neither the override nor the system hostname is usable
pub const FALLBACK_WORKER_ID: &str = "worker-unknown";

/// Environment variable consulted first
pub const HOSTNAME_VAR: &str = "HOSTNAME";

/// Snapshot of the inputs to worker identity resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerEnv {
    /// Value of `HOSTNAME`, if set
    pub hostname_override: Option<String>,
    /// Hostname reported by the operating system
    pub system_hostname: Option<String>,
}

impl WorkerEnv {
    /// Capture the current process environment and system hostname
    pub fn capture() -> Self {
        Self {
            hostname_override: std::env::var(HOSTNAME_VAR).ok(),
            system_hostname: sysinfo::System::host_name(),
        }
    }

    pub fn with_override(mut self, hostname: impl Into<String>) -> Self {
        self.hostname_override = Some(hostname.into());
        self
    }

    pub fn with_system_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.system_hostname = Some(hostname.into());
        self
    }
}

/// Resolve the worker identity from an environment snapshot.
///
/// Never fails and never returns an empty string. Blank candidates fall
/// through to the next source; the chosen one is returned as-is.
pub fn resolve_worker_identity(env: &WorkerEnv) -> String {
    [env.hostname_override.as_deref(), env.system_hostname.as_deref()]
        .into_iter()
        .flatten()
        .find(|candidate| !candidate.trim().is_empty())
        .unwrap_or(FALLBACK_WORKER_ID)
        .to_string()
}

/// Source of the worker identity stamped on new records
pub trait IdentityResolver: Send + Sync + Debug {
    /// Current worker identity; must be non-empty
    fn resolve(&self) -> String;
}

impl IdentityResolver for WorkerEnv {
    fn resolve(&self) -> String {
        resolve_worker_identity(self)
    }
}

/// Fixed worker identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity(String);

impl StaticIdentity {
    pub fn new(worker_id: impl Into<String>) -> Self {
        Self(worker_id.into())
    }
}

impl IdentityResolver for StaticIdentity {
    fn resolve(&self) -> String {
        resolve_worker_identity(&WorkerEnv {
            hostname_override: Some(self.0.clone()),
            system_hostname: None,
        })
    }
}
