//! PowerTap backend API client.
//!
//! This crate provides the client a power-bank rental terminal uses to talk
//! to its backend: connection tokens for the payment-terminal SDK, payment
//! intents, dispensing authorization, pricing, advertising content and order
//! lookup. Every route answers with the same `{code, message, data}` envelope;
//! the facade narrows `data` per operation.

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod interceptor;
pub mod models;
pub mod token_provider;
pub mod transport;

pub use client::PowerTapClient;
pub use client::builder::PowerTapClientBuilder;
pub use envelope::{Payload, PayloadMismatch, PayloadShape, ResponseEnvelope};
pub use error::{ClientError, ConnectionTokenError, Result};
pub use interceptor::DiagnosticLogger;
pub use models::{
    ChargeRule, DAY_LABEL, LendPowerRequest, PaymentRail, StringMap, ValueMap, format_price,
};
pub use token_provider::{ConnectionTokenCallback, ConnectionTokenProvider, TokenProvider};
pub use transport::{
    Timeouts, Transport, TrustPolicy, build_transport, build_transport_with_roots,
};
