//! Tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test builder methods for configuration loading.
//! - Test device file loading and IMEI fallback.
//! - Test environment variable handling and precedence.
//! - Test timeout validation.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Every variable `from_env()` reads, cleared so the host environment cannot leak in.
pub const POWERTAP_VARS: [&str; 10] = [
    "POWERTAP_BASE_URL",
    "POWERTAP_SECRET_KEY",
    "POWERTAP_QR_CODE_URL",
    "POWERTAP_TRUST_POLICY",
    "POWERTAP_CONNECT_TIMEOUT",
    "POWERTAP_READ_TIMEOUT",
    "POWERTAP_WRITE_TIMEOUT",
    "POWERTAP_ENABLE_DEBUG",
    "POWERTAP_CONFIG_PATH",
    "POWERTAP_DEVINFO_PATH",
];

/// Build a `temp_env` variable list with every POWERTAP var unset except `overrides`.
pub fn env_with(overrides: &[(&'static str, &'static str)]) -> Vec<(&'static str, Option<&'static str>)> {
    POWERTAP_VARS
        .iter()
        .map(|var| {
            let value = overrides
                .iter()
                .find(|(name, _)| name == var)
                .map(|(_, value)| *value);
            (*var, value)
        })
        .collect()
}
