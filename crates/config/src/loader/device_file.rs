//! Terminal provisioning files.
//!
//! Responsibilities:
//! - Parse the terminal's `config.txt` (`key: value` lines).
//! - Read the IMEI from `devinfo.txt`.
//! - Apply both to a ConfigLoader instance.
//!
//! Does NOT handle:
//! - Environment variables (see env.rs).
//! - Validation of the resulting values (see builder.rs).
//!
//! Invariants:
//! - A missing device file is a warning, never an error.
//! - File locations come from the loader, then `POWERTAP_CONFIG_PATH` /
//!   `POWERTAP_DEVINFO_PATH`, then the terminal defaults.
//! - Blank lines and lines starting with `#` are ignored.
//! - Only the first `:` separates key and value, so URLs survive intact.
//! - Unknown keys are logged by name only; values are never logged.

use secrecy::SecretString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::builder::ConfigLoader;
use super::env::env_var_or_none;
use super::error::ConfigError;
use crate::constants::{DEFAULT_DEVICE_CONFIG_PATH, DEFAULT_DEVINFO_PATH, DEFAULT_IMEI};

/// Values recognised in a device config file.
#[derive(Debug, Default)]
pub struct DeviceFileValues {
    pub base_url: Option<String>,
    pub secret_key: Option<SecretString>,
    pub qr_code_url: Option<String>,
    pub unknown_keys: Vec<String>,
}

/// Parse the contents of a device config file.
pub fn parse_device_config(contents: &str) -> DeviceFileValues {
    let mut values = DeviceFileValues::default();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().to_string();

        match key {
            "baseUrl" => values.base_url = Some(value),
            "secretKey" => values.secret_key = Some(SecretString::new(value.into())),
            "qrCodeUrl" => values.qr_code_url = Some(value),
            other => values.unknown_keys.push(other.to_string()),
        }
    }

    values
}

/// Read the IMEI from a devinfo file, falling back to [`DEFAULT_IMEI`].
pub fn read_imei(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let imei = contents.trim();
            if imei.is_empty() {
                warn!(path = %path.display(), "IMEI file is empty, using default");
                DEFAULT_IMEI.to_string()
            } else {
                debug!(path = %path.display(), "IMEI loaded");
                imei.to_string()
            }
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e.kind(), "IMEI file not readable, using default");
            DEFAULT_IMEI.to_string()
        }
    }
}

/// Apply the device config file and IMEI file to the loader.
///
/// Values already present on the loader are overwritten; call this before
/// `from_env()` so environment variables keep precedence.
pub fn apply_device_file(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let config_path = loader
        .config_path()
        .cloned()
        .or_else(|| env_var_or_none("POWERTAP_CONFIG_PATH").map(PathBuf::from))
        .unwrap_or_else(|| DEFAULT_DEVICE_CONFIG_PATH.into());

    match std::fs::read_to_string(&config_path) {
        Ok(contents) => {
            let values = parse_device_config(&contents);
            for key in &values.unknown_keys {
                warn!(key = %key, "Unknown config key");
            }
            if values.base_url.is_some() {
                loader.set_base_url(values.base_url);
            }
            if values.secret_key.is_some() {
                loader.set_secret_key(values.secret_key);
            }
            if values.qr_code_url.is_some() {
                loader.set_qr_code_url(values.qr_code_url);
            }
            debug!(path = %config_path.display(), "Device config loaded");
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %config_path.display(), "Device config file not found");
        }
        Err(e) => {
            return Err(ConfigError::ConfigFileRead {
                path: config_path,
                kind: e.kind(),
            });
        }
    }

    let devinfo_path = loader
        .devinfo_path()
        .cloned()
        .or_else(|| env_var_or_none("POWERTAP_DEVINFO_PATH").map(PathBuf::from))
        .unwrap_or_else(|| DEFAULT_DEVINFO_PATH.into());
    loader.set_imei(Some(read_imei(&devinfo_path)));

    Ok(())
}
