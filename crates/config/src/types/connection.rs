//! Connection configuration types for the PowerTap client.
//!
//! Responsibilities:
//! - Define connection settings (URL, TLS trust policy, timeouts).
//! - Define the main `Config` structure combining connection, auth and device settings.
//! - Provide serialization helpers for `Duration`.
//!
//! Does NOT handle:
//! - Configuration loading from files/env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - All duration fields are serialized as seconds (integers).
//! - `TrustPolicy::Strict` is the default; `Permissive` is only ever an explicit choice.

use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, DEFAULT_WRITE_TIMEOUT_SECS,
};
use crate::types::auth::AuthConfig;
use crate::types::device::DeviceConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// How the transport decides whether to trust the server's TLS certificate.
///
/// # Security Warning
///
/// `Permissive` accepts every certificate chain and every hostname. It exists
/// for terminals provisioned against hosts with self-signed or mismatched
/// certificates, and makes the connection open to man-in-the-middle attacks.
/// It must be selected deliberately; it is never the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustPolicy {
    /// Validate the certificate chain and hostname against the platform trust roots.
    #[default]
    Strict,
    /// Accept any certificate chain and skip hostname verification.
    Permissive,
}

impl TrustPolicy {
    /// Returns true if certificate and hostname verification are disabled.
    pub fn is_permissive(self) -> bool {
        matches!(self, Self::Permissive)
    }
}

impl fmt::Display for TrustPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::Permissive => f.write_str("permissive"),
        }
    }
}

impl FromStr for TrustPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            other => Err(format!(
                "unknown trust policy '{other}' (expected strict or permissive)"
            )),
        }
    }
}

/// Per-phase network timeouts applied by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeouts {
    /// Time allowed to establish the TCP/TLS connection.
    #[serde(with = "duration_seconds")]
    pub connect: Duration,
    /// Time allowed between reads of the response.
    #[serde(with = "duration_seconds")]
    pub read: Duration,
    /// Time allowed for transmitting the request.
    #[serde(with = "duration_seconds")]
    pub write: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            read: Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS),
            write: Duration::from_secs(DEFAULT_WRITE_TIMEOUT_SECS),
        }
    }
}

impl Timeouts {
    /// Upper bound on a whole request/response exchange.
    pub fn total(&self) -> Duration {
        self.connect + self.read + self.write
    }
}

/// Connection configuration for the PowerTap service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the service, including any path prefix (e.g. https://host/power_bank)
    pub base_url: String,
    /// TLS trust policy for the transport
    #[serde(default)]
    pub trust_policy: TrustPolicy,
    /// Network timeouts
    #[serde(default)]
    pub timeouts: Timeouts,
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Authentication settings
    pub auth: AuthConfig,
    /// Terminal-specific settings
    #[serde(default)]
    pub device: DeviceConfig,
}

impl Config {
    /// Create a config with a base URL and secret key, leaving everything else at defaults.
    pub fn with_secret_key(base_url: String, secret_key: secrecy::SecretString) -> Self {
        Self {
            connection: ConnectionConfig {
                base_url,
                trust_policy: TrustPolicy::default(),
                timeouts: Timeouts::default(),
            },
            auth: AuthConfig { secret_key },
            device: DeviceConfig::default(),
        }
    }
}
