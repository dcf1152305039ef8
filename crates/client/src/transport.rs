//! HTTP transport construction.
//!
//! Responsibilities:
//! - Build the single HTTP client shared by every facade operation.
//! - Apply the connect/read timeouts and bound the whole exchange.
//! - Attach the diagnostic interceptor.
//! - Apply the selected TLS trust policy.
//! - Add extra trusted root certificates for privately issued server certs.
//!
//! Does NOT handle:
//! - URL construction or query parameters (see `crate::endpoints`).
//!
//! Invariants:
//! - The trust policy is fixed for the lifetime of a `Transport`.
//! - `TrustPolicy::Permissive` logs a warning every time a transport is built.
//! - reqwest has no per-write timeout, so the overall request timeout is the
//!   sum of the connect, read and write timeouts.

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use std::fmt;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};
use crate::interceptor::DiagnosticLogger;

pub use powertap_config::{Timeouts, TrustPolicy};

/// Configured HTTP client. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct Transport {
    inner: ClientWithMiddleware,
    trust_policy: TrustPolicy,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("trust_policy", &self.trust_policy)
            .finish_non_exhaustive()
    }
}

impl Transport {
    pub fn trust_policy(&self) -> TrustPolicy {
        self.trust_policy
    }

    pub(crate) fn get(&self, url: url::Url) -> RequestBuilder {
        self.inner.get(url)
    }

    pub(crate) fn post(&self, url: url::Url) -> RequestBuilder {
        self.inner.post(url)
    }
}

/// Build a transport with the given trust policy and timeouts.
///
/// # Errors
///
/// Returns `ClientError::TransportInit` if the TLS backend cannot be initialised.
pub fn build_transport(policy: TrustPolicy, timeouts: Timeouts) -> Result<Transport> {
    build_transport_with_roots(policy, timeouts, &[])
}

/// Like [`build_transport`], but also trusts `roots` alongside the system roots.
///
/// Under `TrustPolicy::Strict` the hostname is still checked against a chain
/// that ends in one of these roots.
pub fn build_transport_with_roots(
    policy: TrustPolicy,
    timeouts: Timeouts,
    roots: &[reqwest::Certificate],
) -> Result<Transport> {
    let mut builder = reqwest::Client::builder()
        .connect_timeout(timeouts.connect)
        .read_timeout(timeouts.read)
        .timeout(timeouts.total());

    for root in roots {
        builder = builder.add_root_certificate(root.clone());
    }

    match policy {
        TrustPolicy::Strict => {}
        TrustPolicy::Permissive => {
            warn!(
                "TLS trust policy is PERMISSIVE: server certificates and hostnames are NOT verified. \
                 Connections are open to interception."
            );
            builder = builder
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true);
        }
    }

    let http = builder
        .build()
        .map_err(|e| ClientError::TransportInit(e.to_string()))?;

    let inner = ClientBuilder::new(http).with(DiagnosticLogger).build();

    debug!(
        trust_policy = %policy,
        connect_ms = timeouts.connect.as_millis() as u64,
        read_ms = timeouts.read.as_millis() as u64,
        write_ms = timeouts.write.as_millis() as u64,
        extra_roots = roots.len(),
        "Transport built"
    );

    Ok(Transport {
        inner,
        trust_policy: policy,
    })
}
