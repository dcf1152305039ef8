//! Terminal-specific settings that are not needed to reach the service.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_IMEI;

/// Settings describing the physical terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Prefix of the rental URL encoded into the on-screen QR code.
    #[serde(default)]
    pub qr_code_url: Option<String>,
    /// Terminal IMEI read from `devinfo.txt`.
    #[serde(default = "default_imei")]
    pub imei: String,
    /// Enables verbose diagnostics in the terminal shell.
    #[serde(default)]
    pub enable_debug: bool,
}

fn default_imei() -> String {
    DEFAULT_IMEI.to_string()
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            qr_code_url: None,
            imei: default_imei(),
            enable_debug: false,
        }
    }
}
