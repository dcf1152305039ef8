//! Configuration management for the PowerTap terminal client.
//!
//! This crate provides types and loaders for the service connection settings
//! (base URL, secret key, TLS trust policy, timeouts) read from environment
//! variables and the terminal's provisioning files.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{
    ConfigError, ConfigLoader, DeviceFileValues, env_var_or_none, parse_device_config, read_imei,
};
pub use types::{AuthConfig, Config, ConnectionConfig, DeviceConfig, Timeouts, TrustPolicy};
