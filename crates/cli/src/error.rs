//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ClientError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Application failures reported inside an envelope are not errors; the
//!   command prints `null` or the raw envelope and exits 0.

use powertap_client::{ClientError, ConnectionTokenError};
use powertap_config::ConfigError;

/// Structured exit codes for powertap-cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Connection error - network, TLS, or timeout failure.
    ///
    /// Scripts may retry later.
    ConnectionError = 3,

    /// Validation error - bad configuration, bad URL or malformed reply.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::HttpError(e) if e.is_decode() => ExitCode::ValidationError,
            ClientError::HttpError(e) if e.is_connect() || e.is_timeout() || e.is_request() => {
                ExitCode::ConnectionError
            }
            ClientError::HttpError(_) => ExitCode::GeneralError,
            ClientError::Middleware(_) => ExitCode::ConnectionError,
            ClientError::InvalidUrl(_) => ExitCode::ValidationError,
            ClientError::InvalidResponse(_) => ExitCode::ValidationError,
            ClientError::MissingSecretKey => ExitCode::ValidationError,
            ClientError::TransportInit(_) => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no known error type is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if let Some(token_err) = cause.downcast_ref::<ConnectionTokenError>() {
                return token_err
                    .client_error()
                    .map(ExitCode::from)
                    .unwrap_or(ExitCode::GeneralError);
            }
            if cause.downcast_ref::<ConfigError>().is_some() {
                return ExitCode::ValidationError;
            }
        }

        ExitCode::GeneralError
    }
}
