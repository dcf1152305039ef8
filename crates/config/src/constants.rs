//! Centralized constants for the PowerTap workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default TCP/TLS connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default read timeout in seconds.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 20;

/// Default write timeout in seconds.
pub const DEFAULT_WRITE_TIMEOUT_SECS: u64 = 20;

/// Maximum allowed value for any single timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

// =============================================================================
// Envelope Contract
// =============================================================================

/// Envelope `code` value the service uses to signal success.
pub const SUCCESS_CODE: i32 = 200;

// =============================================================================
// Device Files
// =============================================================================

/// Location of the terminal's provisioning file.
pub const DEFAULT_DEVICE_CONFIG_PATH: &str = "/sdcard/Player/config.txt";

/// Location of the file carrying the terminal's IMEI.
pub const DEFAULT_DEVINFO_PATH: &str = "/sdcard/devinfo.txt";

/// IMEI reported when `devinfo.txt` is missing, unreadable, or empty.
pub const DEFAULT_IMEI: &str = "123456";
