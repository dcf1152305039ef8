//! PowerTap service client and API methods.
//!
//! This module provides [`PowerTapClient`], one method per service capability.
//! Methods apply the per-operation narrowing of the response envelope.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `terminal`: connection tokens, payment intents, dispensing, pre-amount
//! - `advertising`: content version, brightness, QR lookup, ad playlist
//! - `orders`: order lookup, charge rules
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Transport construction (delegated to [`crate::transport`])
//!
//! # Invariants
//! - Narrowing methods return `Ok(None)` when the envelope is absent, its
//!   `code` is not 200, or its `data` has the wrong shape.
//! - Raw methods return the envelope untouched.
//! - Transport failures are always `Err`.
//! - The client is immutable after construction and safe to share across tasks.

pub mod builder;

mod advertising;
mod orders;
mod terminal;

use secrecy::SecretString;

use crate::envelope::{PayloadMismatch, ResponseEnvelope};
use crate::transport::{Transport, TrustPolicy};

/// PowerTap service client.
///
/// Create one with [`PowerTapClient::builder()`] and share it (for example in
/// an `Arc`) between every caller in the process.
#[derive(Debug)]
pub struct PowerTapClient {
    pub(crate) transport: Transport,
    pub(crate) base_url: String,
    pub(crate) secret_key: SecretString,
}

impl PowerTapClient {
    /// Create a new client builder.
    pub fn builder() -> builder::PowerTapClientBuilder {
        builder::PowerTapClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the TLS trust policy the transport was built with.
    pub fn trust_policy(&self) -> TrustPolicy {
        self.transport.trust_policy()
    }
}

/// Apply the narrowing policy: success code and expected shape, else `None`.
fn narrow<T>(
    envelope: Option<ResponseEnvelope>,
    endpoint: &str,
    extract: impl FnOnce(&ResponseEnvelope) -> Result<T, PayloadMismatch>,
) -> Option<T> {
    let envelope = envelope?;
    if !envelope.is_success() {
        tracing::debug!(
            endpoint,
            code = envelope.code,
            message = %envelope.message,
            "Service reported failure"
        );
        return None;
    }
    match extract(&envelope) {
        Ok(value) => Some(value),
        Err(mismatch) => {
            tracing::warn!(endpoint, error = %mismatch, "Unexpected payload shape");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Payload;

    fn envelope(code: i32, data: Payload) -> Option<ResponseEnvelope> {
        Some(ResponseEnvelope {
            code,
            message: String::new(),
            data,
        })
    }

    #[test]
    fn test_narrow_success() {
        let result = narrow(envelope(200, Payload::Text("t".into())), "test", |e| {
            e.data.expect_text().map(str::to_string)
        });
        assert_eq!(result.as_deref(), Some("t"));
    }

    #[test]
    fn test_narrow_failure_code() {
        let result = narrow(envelope(500, Payload::Text("t".into())), "test", |e| {
            e.data.expect_text().map(str::to_string)
        });
        assert!(result.is_none());
    }

    #[test]
    fn test_narrow_shape_mismatch() {
        let result = narrow(envelope(200, Payload::Absent), "test", |e| {
            e.data.expect_text().map(str::to_string)
        });
        assert!(result.is_none());
    }

    #[test]
    fn test_narrow_absent_envelope() {
        let result = narrow(None, "test", |e| e.data.expect_text().map(str::to_string));
        assert!(result.is_none());
    }
}
