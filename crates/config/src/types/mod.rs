//! Configuration type definitions for the PowerTap client.
//!
//! Responsibilities:
//! - Define configuration types for authentication, connection and device settings.
//! - Provide serialization helpers for sensitive types (secrets, durations).
//!
//! Does NOT handle:
//! - Configuration loading from files or environment variables (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - The secret key uses `secrecy::SecretString` to prevent accidental logging.
//! - Serialization helpers (`secret_string`, `duration_seconds`) are private modules.

mod auth;
pub(crate) mod connection;
mod device;

pub use auth::AuthConfig;
pub use connection::{Config, ConnectionConfig, Timeouts, TrustPolicy};
pub use device::DeviceConfig;
