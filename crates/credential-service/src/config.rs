//! Service configuration
//!
//! Loaded from environment variables. [`ServiceConfig::from_lookup`] takes
//! the lookup as a function so tests can supply values without touching the
//! process environment.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;
use tracing::Level;

use crate::core::DuplicatePolicy;

pub const ROLE_VAR: &str = "CREDENTIAL_SERVICE_ROLE";
pub const BIND_HOST_VAR: &str = "CREDENTIAL_BIND_HOST";
pub const PORT_VAR: &str = "PORT";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const DUPLICATE_POLICY_VAR: &str = "CREDENTIAL_DUPLICATE_POLICY";
pub const LOG_LEVEL_VAR: &str = "CREDENTIAL_LOG_LEVEL";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Which logical service a process serves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ServiceRole {
    /// `POST /credentials/issue`
    Issuance,
    /// `GET /credentials/verify/{id}`
    Verification,
    /// Both route sets in one process
    #[default]
    Combined,
}

impl ServiceRole {
    /// Port used when `PORT` is not set
    pub fn default_port(&self) -> u16 {
        match self {
            ServiceRole::Issuance => 3001,
            ServiceRole::Verification => 3002,
            ServiceRole::Combined => 3000,
        }
    }

    /// Name reported by the health endpoint
    pub fn service_name(&self) -> &'static str {
        match self {
            ServiceRole::Issuance => "issuance-service",
            ServiceRole::Verification => "verification-service",
            ServiceRole::Combined => "credential-service",
        }
    }

    pub fn serves_issuance(&self) -> bool {
        matches!(self, ServiceRole::Issuance | ServiceRole::Combined)
    }

    pub fn serves_verification(&self) -> bool {
        matches!(self, ServiceRole::Verification | ServiceRole::Combined)
    }
}

impl fmt::Display for ServiceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceRole::Issuance => "issuance",
            ServiceRole::Verification => "verification",
            ServiceRole::Combined => "combined",
        };
        f.write_str(s)
    }
}

impl FromStr for ServiceRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "issuance" => Ok(ServiceRole::Issuance),
            "verification" => Ok(ServiceRole::Verification),
            "combined" => Ok(ServiceRole::Combined),
            other => Err(format!(
                "unknown role '{}', expected 'issuance', 'verification' or 'combined'",
                other
            )),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Route set to mount
    pub role: ServiceRole,

    /// Address to bind the server to
    pub bind_address: SocketAddr,

    /// PostgreSQL connection string; in-memory store when unset
    pub database_url: Option<String>,

    /// Reporting of uniqueness violations during issuance
    pub duplicate_policy: DuplicatePolicy,

    /// Maximum tracing level
    pub log_level: Level,
}

impl ServiceConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let role: ServiceRole = parse_var(&lookup, ROLE_VAR)?.unwrap_or_default();

        let host: IpAddr =
            parse_var(&lookup, BIND_HOST_VAR)?.unwrap_or(IpAddr::from([0, 0, 0, 0]));
        let port: u16 = parse_var(&lookup, PORT_VAR)?.unwrap_or_else(|| role.default_port());

        let database_url = lookup(DATABASE_URL_VAR).filter(|url| !url.is_empty());

        let duplicate_policy = parse_var(&lookup, DUPLICATE_POLICY_VAR)?.unwrap_or_default();
        let log_level = parse_var(&lookup, LOG_LEVEL_VAR)?.unwrap_or(Level::INFO);

        Ok(ServiceConfig {
            role,
            bind_address: SocketAddr::new(host, port),
            database_url,
            duplicate_policy,
            log_level,
        })
    }
}

/// Parse an optional variable; unset or empty yields `None`
fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(var) {
        Some(value) if !value.is_empty() => value
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                var,
                value,
                reason: e.to_string(),
            }),
        _ => Ok(None),
    }
}
