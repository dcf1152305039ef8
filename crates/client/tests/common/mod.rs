//! Common test utilities for integration tests.
//!
//! This module provides shared helper functions and re-exports commonly used
//! types for testing the PowerTap client.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use secrecy::SecretString;
use std::path::Path;

#[allow(unused_imports)]
pub use powertap_client::{PowerTapClient, Timeouts, TrustPolicy, endpoints};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Secret key used by every mocked client.
#[allow(dead_code)]
pub const TEST_SECRET_KEY: &str = "test-secret-key";

/// Load a JSON fixture from `fixtures/`.
#[allow(dead_code)]
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let full_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// Client pointed at the mock server root.
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> PowerTapClient {
    client_with_base_url(server.uri())
}

/// Client whose base URL carries a path prefix, like production deployments.
#[allow(dead_code)]
pub fn client_with_prefix(server: &MockServer, prefix: &str) -> PowerTapClient {
    client_with_base_url(format!("{}{}", server.uri(), prefix))
}

#[allow(dead_code)]
pub fn client_with_base_url(base_url: String) -> PowerTapClient {
    PowerTapClient::builder()
        .base_url(base_url)
        .secret_key(SecretString::new(TEST_SECRET_KEY.to_string().into()))
        .build()
        .expect("client should build")
}

/// Install a debug-level subscriber so interceptor log paths execute.
#[allow(dead_code)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}
