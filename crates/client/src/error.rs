//! Error types for the PowerTap client.
//!
//! Responsibilities:
//! - Classify transport failures (connect, TLS, timeout, body read) separately
//!   from application failures, which never surface here: a `code != 200`
//!   envelope is data, not an error.
//! - Provide the fixed-message error handed to the terminal SDK when a
//!   connection token cannot be produced.
//!
//! Does NOT handle:
//! - Payload shape mismatches (see [`crate::envelope::PayloadMismatch`]).

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during PowerTap client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request error (connect, TLS handshake, timeout, body read).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failure raised inside the middleware chain rather than by reqwest.
    #[error("Middleware error: {0}")]
    Middleware(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid response format from the service.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// The HTTP client could not be constructed (TLS backend initialisation).
    #[error("Failed to initialise transport: {0}")]
    TransportInit(String),

    /// No secret key was supplied to the client builder.
    #[error("Secret key is required")]
    MissingSecretKey,
}

impl ClientError {
    /// Check if this error is a request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::HttpError(e) if e.is_timeout())
    }

    /// Check if this error came from the network layer.
    ///
    /// Transport failures are the ones a terminal should report as
    /// "no connection" rather than as a malformed reply.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::HttpError(e) => !e.is_decode(),
            Self::Middleware(_) => true,
            _ => false,
        }
    }
}

impl From<reqwest_middleware::Error> for ClientError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(e) => Self::HttpError(e),
            reqwest_middleware::Error::Middleware(e) => Self::Middleware(format!("{e:#}")),
        }
    }
}

/// Failure to produce a payment-terminal connection token.
///
/// The message is fixed; the underlying cause, when there is one, is kept as
/// the error source.
#[derive(Error, Debug)]
#[error("Creating connection token failed")]
pub struct ConnectionTokenError {
    #[source]
    source: Option<Box<ClientError>>,
}

impl ConnectionTokenError {
    /// Token request reached the service but produced no usable token.
    pub fn rejected() -> Self {
        Self { source: None }
    }

    /// Token request failed in transport.
    pub fn from_client(err: ClientError) -> Self {
        Self {
            source: Some(Box::new(err)),
        }
    }

    /// The underlying client error, if the failure was a transport failure.
    pub fn client_error(&self) -> Option<&ClientError> {
        self.source.as_deref()
    }
}

impl From<ClientError> for ConnectionTokenError {
    fn from(err: ClientError) -> Self {
        Self::from_client(err)
    }
}
