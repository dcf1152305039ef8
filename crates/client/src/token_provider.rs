//! Connection-token adapter for the embedded payment-terminal SDK.
//!
//! Responsibilities:
//! - Bridge the SDK's callback-style token request to the async client.
//!
//! Does NOT handle:
//! - Token caching or retries. Every request is a fresh round trip.
//!
//! Invariants:
//! - Each callback is completed exactly once, with either the token or a
//!   [`ConnectionTokenError`]. The trait consumes the callback to enforce it.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::debug;

use crate::client::PowerTapClient;
use crate::error::ConnectionTokenError;

/// Completion handle supplied by the terminal SDK.
pub trait ConnectionTokenCallback: Send {
    fn on_success(self, token: String);
    fn on_failure(self, error: ConnectionTokenError);
}

impl ConnectionTokenCallback for oneshot::Sender<Result<String, ConnectionTokenError>> {
    fn on_success(self, token: String) {
        if self.send(Ok(token)).is_err() {
            debug!("Connection token receiver dropped");
        }
    }

    fn on_failure(self, error: ConnectionTokenError) {
        if self.send(Err(error)).is_err() {
            debug!("Connection token receiver dropped");
        }
    }
}

/// Source of connection tokens, as seen by the terminal SDK.
pub trait ConnectionTokenProvider {
    fn fetch_connection_token<C>(&self, callback: C) -> impl Future<Output = ()> + Send
    where
        C: ConnectionTokenCallback + 'static;
}

/// Provider backed by [`PowerTapClient::create_connection_token`].
#[derive(Debug, Clone)]
pub struct TokenProvider {
    client: Arc<PowerTapClient>,
}

impl TokenProvider {
    pub fn new(client: Arc<PowerTapClient>) -> Self {
        Self { client }
    }
}

impl ConnectionTokenProvider for TokenProvider {
    fn fetch_connection_token<C>(&self, callback: C) -> impl Future<Output = ()> + Send
    where
        C: ConnectionTokenCallback + 'static,
    {
        let client = Arc::clone(&self.client);
        async move {
            match client.create_connection_token().await {
                Ok(token) => callback.on_success(token),
                Err(err) => callback.on_failure(err),
            }
        }
    }
}
