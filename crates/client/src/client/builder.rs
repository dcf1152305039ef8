//! Client builder for constructing [`PowerTapClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (base_url, secret_key)
//! - Normalizing the base URL (removing trailing slashes)
//! - Building the shared transport (timeouts, trust policy, interceptor)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`PowerTapClient`] methods in sibling modules)
//! - Loading configuration from the environment (see `powertap_config::ConfigLoader`)
//!
//! # Invariants
//! - `base_url` and `secret_key` are required and must be provided before calling `build()`
//! - The base URL is always normalized to have no trailing slashes
//! - The trust policy defaults to `Strict`; `Permissive` is only ever set explicitly

use secrecy::SecretString;

use crate::client::PowerTapClient;
use crate::error::{ClientError, Result};
use crate::transport::{Timeouts, TrustPolicy, build_transport_with_roots};
use powertap_config::Config;

/// Builder for creating a new [`PowerTapClient`].
///
/// # Example
///
/// ```rust,ignore
/// use powertap_client::PowerTapClient;
/// use secrecy::SecretString;
///
/// let client = PowerTapClient::builder()
///     .base_url("https://api.example.com/power_bank".to_string())
///     .secret_key(SecretString::new("key".to_string().into()))
///     .build()?;
/// ```
#[derive(Default)]
pub struct PowerTapClientBuilder {
    base_url: Option<String>,
    secret_key: Option<SecretString>,
    trust_policy: TrustPolicy,
    timeouts: Timeouts,
    root_certificates: Vec<reqwest::Certificate>,
}

impl PowerTapClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the service, including any path prefix.
    ///
    /// Trailing slashes will be automatically removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the secret key sent with authenticated calls.
    pub fn secret_key(mut self, key: SecretString) -> Self {
        self.secret_key = Some(key);
        self
    }

    /// Set the TLS trust policy.
    ///
    /// # Security Warning
    /// `TrustPolicy::Permissive` disables certificate and hostname verification,
    /// making the connection vulnerable to man-in-the-middle attacks.
    pub fn trust_policy(mut self, policy: TrustPolicy) -> Self {
        self.trust_policy = policy;
        self
    }

    /// Set the network timeouts.
    ///
    /// Default is 30s connect, 20s read, 20s write.
    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Trust an extra root certificate, e.g. a private CA for an on-site server.
    ///
    /// Hostname verification still applies under `TrustPolicy::Strict`.
    pub fn add_root_certificate(mut self, cert: reqwest::Certificate) -> Self {
        self.root_certificates.push(cert);
        self
    }

    /// Create a client builder from loaded configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.base_url.clone());
        self.secret_key = Some(config.auth.secret_key.clone());
        self.trust_policy = config.connection.trust_policy;
        self.timeouts = config.connection.timeouts;
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    ///
    /// - `"https://api.example.com/power_bank/"` -> `"https://api.example.com/power_bank"`
    /// - `"http://localhost:8080//"` -> `"http://localhost:8080"`
    fn normalize_base_url(url: String) -> String {
        url.trim().trim_end_matches('/').to_string()
    }

    /// Build the [`PowerTapClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is missing or does not parse.
    /// Returns [`ClientError::MissingSecretKey`] if `secret_key` was not provided.
    /// Returns [`ClientError::TransportInit`] if the HTTP client fails to build.
    pub fn build(self) -> Result<PowerTapClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);
        url::Url::parse(&base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        let secret_key = self.secret_key.ok_or(ClientError::MissingSecretKey)?;

        let transport =
            build_transport_with_roots(self.trust_policy, self.timeouts, &self.root_certificates)?;

        Ok(PowerTapClient {
            transport,
            base_url,
            secret_key,
        })
    }
}
