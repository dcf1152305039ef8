//! Shared test utilities for powertap-cli integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Keep the host's device file and environment out of every test.
//!
//! Invariants / Assumptions:
//! - `POWERTAP_SECRET_KEY` is set to "test-secret-key" unless overridden.
//! - Device file paths point at locations that do not exist.

use assert_cmd::Command;

/// Secret key every hermetic command is configured with.
#[allow(dead_code)]
pub const TEST_SECRET_KEY: &str = "test-secret-key";

/// Returns a hermetic `powertap-cli` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `POWERTAP_SECRET_KEY` is set to a dummy value to satisfy config validation.
/// - The device file lookup never reaches the host's real config.
pub fn powertap_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("powertap-cli");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("POWERTAP_SECRET_KEY", TEST_SECRET_KEY);

    let missing = std::env::temp_dir().join("powertap-cli-tests-missing");
    cmd.env("POWERTAP_CONFIG_PATH", missing.join("config.txt"))
        .env("POWERTAP_DEVINFO_PATH", missing.join("devinfo.txt"));

    cmd.env_remove("POWERTAP_BASE_URL")
        .env_remove("POWERTAP_QR_CODE_URL")
        .env_remove("POWERTAP_TRUST_POLICY")
        .env_remove("POWERTAP_CONNECT_TIMEOUT")
        .env_remove("POWERTAP_READ_TIMEOUT")
        .env_remove("POWERTAP_WRITE_TIMEOUT")
        .env_remove("POWERTAP_ENABLE_DEBUG")
        .env_remove("RUST_LOG");

    cmd
}

/// Returns a hermetic `powertap-cli` command with a specific base URL.
#[allow(dead_code)]
pub fn powertap_cmd_with_base_url(base_url: &str) -> Command {
    let mut cmd = powertap_cmd();
    cmd.env("POWERTAP_BASE_URL", base_url);
    cmd
}

/// A base URL whose port nothing listens on.
#[allow(dead_code)]
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
