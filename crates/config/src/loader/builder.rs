//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Support loading from the device config file, environment variables, and direct builder methods.
//! - Build and validate the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Device file parsing (delegated to device_file.rs).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over device file values when
//!   `from_device_file()` is called before `from_env()`.
//! - Builder methods take precedence over environment variables when applied last.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use super::device_file::apply_device_file;
use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{DEFAULT_IMEI, MAX_TIMEOUT_SECS};
use crate::types::{AuthConfig, Config, ConnectionConfig, DeviceConfig, Timeouts, TrustPolicy};

/// Configuration loader that builds config from the device file, environment and overrides.
#[derive(Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    secret_key: Option<SecretString>,
    qr_code_url: Option<String>,
    trust_policy: Option<TrustPolicy>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
    enable_debug: Option<bool>,
    imei: Option<String>,
    config_path: Option<PathBuf>,
    devinfo_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Override the device config file path.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Override the devinfo (IMEI) file path.
    pub fn with_devinfo_path(mut self, path: PathBuf) -> Self {
        self.devinfo_path = Some(path);
        self
    }

    /// Read the terminal's device config file and IMEI file.
    ///
    /// A missing config file only logs a warning.
    pub fn from_device_file(mut self) -> Result<Self, ConfigError> {
        apply_device_file(&mut self)?;
        Ok(self)
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the secret key.
    pub fn with_secret_key(mut self, key: String) -> Self {
        self.secret_key = Some(SecretString::new(key.into()));
        self
    }

    /// Set the QR code URL prefix.
    pub fn with_qr_code_url(mut self, url: String) -> Self {
        self.qr_code_url = Some(url);
        self
    }

    /// Set the TLS trust policy.
    pub fn with_trust_policy(mut self, policy: TrustPolicy) -> Self {
        self.trust_policy = Some(policy);
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the read timeout.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Set the write timeout.
    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = Some(timeout);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = self
            .base_url
            .as_deref()
            .map(validate_and_normalize_base_url)
            .transpose()?
            .ok_or(ConfigError::MissingBaseUrl)?;

        let secret_key = self.secret_key.ok_or(ConfigError::MissingSecretKey)?;

        let defaults = Timeouts::default();
        let timeouts = Timeouts {
            connect: self.connect_timeout.unwrap_or(defaults.connect),
            read: self.read_timeout.unwrap_or(defaults.read),
            write: self.write_timeout.unwrap_or(defaults.write),
        };
        Self::validate_timeouts(&timeouts)?;

        let trust_policy = self.trust_policy.unwrap_or_default();
        if trust_policy.is_permissive() {
            warn!(
                base_url = %base_url,
                "Permissive TLS trust policy configured: certificate and hostname verification are disabled"
            );
        }

        Ok(Config {
            connection: ConnectionConfig {
                base_url,
                trust_policy,
                timeouts,
            },
            auth: AuthConfig { secret_key },
            device: DeviceConfig {
                qr_code_url: self.qr_code_url,
                imei: self.imei.unwrap_or_else(|| DEFAULT_IMEI.to_string()),
                enable_debug: self.enable_debug.unwrap_or(false),
            },
        })
    }

    /// Validates timeout values.
    ///
    /// Each timeout must be greater than 0 and not exceed MAX_TIMEOUT_SECS.
    fn validate_timeouts(timeouts: &Timeouts) -> Result<(), ConfigError> {
        for (name, value) in [
            ("connect", timeouts.connect),
            ("read", timeouts.read),
            ("write", timeouts.write),
        ] {
            let secs = value.as_secs();
            if secs == 0 {
                return Err(ConfigError::InvalidTimeout {
                    message: format!("{name} timeout must be greater than 0 seconds"),
                });
            }
            if secs > MAX_TIMEOUT_SECS {
                return Err(ConfigError::InvalidTimeout {
                    message: format!(
                        "{name} timeout exceeds maximum allowed value of {} seconds",
                        MAX_TIMEOUT_SECS
                    ),
                });
            }
        }
        Ok(())
    }

    // Internal accessor methods for use by other loader modules

    pub(crate) fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    pub(crate) fn devinfo_path(&self) -> Option<&PathBuf> {
        self.devinfo_path.as_ref()
    }

    pub(crate) fn set_config_path(&mut self, path: Option<PathBuf>) {
        self.config_path = path;
    }

    pub(crate) fn set_devinfo_path(&mut self, path: Option<PathBuf>) {
        self.devinfo_path = path;
    }

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_secret_key(&mut self, key: Option<SecretString>) {
        self.secret_key = key;
    }

    pub(crate) fn set_qr_code_url(&mut self, url: Option<String>) {
        self.qr_code_url = url;
    }

    pub(crate) fn set_trust_policy(&mut self, policy: Option<TrustPolicy>) {
        self.trust_policy = policy;
    }

    pub(crate) fn set_connect_timeout(&mut self, timeout: Option<Duration>) {
        self.connect_timeout = timeout;
    }

    pub(crate) fn set_read_timeout(&mut self, timeout: Option<Duration>) {
        self.read_timeout = timeout;
    }

    pub(crate) fn set_write_timeout(&mut self, timeout: Option<Duration>) {
        self.write_timeout = timeout;
    }

    pub(crate) fn set_enable_debug(&mut self, enabled: Option<bool>) {
        self.enable_debug = enabled;
    }

    pub(crate) fn set_imei(&mut self, imei: Option<String>) {
        self.imei = imei;
    }
}

/// Validates and normalizes a base URL string.
///
/// Validation rules:
/// - Trim surrounding whitespace
/// - Treat blank/whitespace-only as missing (returns Err(ConfigError::MissingBaseUrl))
/// - Parse as an absolute URL
/// - Require scheme is http or https
/// - Require host is present
/// - Normalize by stripping trailing slash (the path prefix is kept)
fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. https://api.example.com/power_bank): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "host is required (e.g. https://api.example.com)".into(),
        });
    }

    let normalized = parsed.as_str().trim_end_matches('/').to_string();

    Ok(normalized)
}
