//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `POWERTAP_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Loading the device config file (see device_file.rs).
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Environment variables take precedence over device file settings.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::types::TrustPolicy;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_seconds(var: &str, value: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = value.parse().map_err(|_| ConfigError::InvalidValue {
        var: var.to_string(),
        message: "must be a number of seconds".to_string(),
    })?;
    Ok(Duration::from_secs(secs))
}

/// Apply environment variable configuration to the loader.
///
/// Environment variables take precedence over device file settings.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("POWERTAP_BASE_URL") {
        loader.set_base_url(Some(url));
    }
    if let Some(key) = env_var_or_none("POWERTAP_SECRET_KEY") {
        loader.set_secret_key(Some(SecretString::new(key.into())));
    }
    if let Some(url) = env_var_or_none("POWERTAP_QR_CODE_URL") {
        loader.set_qr_code_url(Some(url));
    }
    if let Some(policy) = env_var_or_none("POWERTAP_TRUST_POLICY") {
        let policy: TrustPolicy =
            policy
                .parse()
                .map_err(|message| ConfigError::InvalidValue {
                    var: "POWERTAP_TRUST_POLICY".to_string(),
                    message,
                })?;
        loader.set_trust_policy(Some(policy));
    }
    if let Some(timeout) = env_var_or_none("POWERTAP_CONNECT_TIMEOUT") {
        loader.set_connect_timeout(Some(parse_seconds("POWERTAP_CONNECT_TIMEOUT", &timeout)?));
    }
    if let Some(timeout) = env_var_or_none("POWERTAP_READ_TIMEOUT") {
        loader.set_read_timeout(Some(parse_seconds("POWERTAP_READ_TIMEOUT", &timeout)?));
    }
    if let Some(timeout) = env_var_or_none("POWERTAP_WRITE_TIMEOUT") {
        loader.set_write_timeout(Some(parse_seconds("POWERTAP_WRITE_TIMEOUT", &timeout)?));
    }
    if let Some(enabled) = env_var_or_none("POWERTAP_ENABLE_DEBUG") {
        loader.set_enable_debug(Some(enabled.parse().map_err(|_| {
            ConfigError::InvalidValue {
                var: "POWERTAP_ENABLE_DEBUG".to_string(),
                message: "must be true or false".to_string(),
            }
        })?));
    }

    // File locations from environment (only if not already set via CLI)
    if loader.config_path().is_none()
        && let Some(path) = env_var_or_none("POWERTAP_CONFIG_PATH")
    {
        loader.set_config_path(Some(PathBuf::from(path)));
    }
    if loader.devinfo_path().is_none()
        && let Some(path) = env_var_or_none("POWERTAP_DEVINFO_PATH")
    {
        loader.set_devinfo_path(Some(PathBuf::from(path)));
    }

    Ok(())
}
