//! Configuration loader for environment variables and device files.
//!
//! Responsibilities:
//! - Load configuration from `.env` files, environment variables, and the terminal's `config.txt`.
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Persisting configuration changes back to disk.
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over device file values.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

mod builder;
mod device_file;
mod env;
mod error;

pub use builder::ConfigLoader;
pub use device_file::{DeviceFileValues, parse_device_config, read_imei};
pub use env::env_var_or_none;
pub use error::ConfigError;

#[cfg(test)]
mod tests;
