//! Payment-terminal API methods for [`PowerTapClient`].
//!
//! # What this module handles:
//! - Connection tokens for the terminal SDK
//! - Payment intents and the pre-authorization amount
//! - Dispensing authorization on both payment rails
//! - Location lookup (raw envelope)
//!
//! # What this module does NOT handle:
//! - Low-level HTTP calls (in [`crate::endpoints`])

use secrecy::ExposeSecret;
use tracing::debug;

use crate::client::{PowerTapClient, narrow};
use crate::endpoints;
use crate::envelope::ResponseEnvelope;
use crate::error::{ConnectionTokenError, Result};
use crate::models::{LendPowerRequest, StringMap, ValueMap};

impl PowerTapClient {
    /// Fetch a payment-terminal connection token.
    ///
    /// Succeeds only when the service returns `code == 200` with a string
    /// payload. Every other outcome, transport failures included, is a
    /// [`ConnectionTokenError`].
    pub async fn create_connection_token(
        &self,
    ) -> std::result::Result<String, ConnectionTokenError> {
        let envelope = endpoints::create_connection_token(
            &self.transport,
            &self.base_url,
            self.secret_key.expose_secret(),
        )
        .await?;

        let Some(envelope) = envelope else {
            debug!("Connection token request returned no envelope");
            return Err(ConnectionTokenError::rejected());
        };
        if !envelope.is_success() {
            debug!(code = envelope.code, message = %envelope.message, "Connection token rejected");
            return Err(ConnectionTokenError::rejected());
        }
        match envelope.data.expect_text() {
            Ok(token) => Ok(token.to_string()),
            Err(mismatch) => {
                debug!(error = %mismatch, "Connection token payload missing");
                Err(ConnectionTokenError::rejected())
            }
        }
    }

    /// Create a payment intent for the cabinet identified by `qr_code`.
    pub async fn create_payment_intent(&self, qr_code: &str) -> Result<Option<StringMap>> {
        let envelope = endpoints::create_payment_intent(
            &self.transport,
            &self.base_url,
            self.secret_key.expose_secret(),
            qr_code,
        )
        .await?;
        Ok(narrow(envelope, "createPaymentIntent4Terminal", |e| {
            e.data.expect_string_map()
        }))
    }

    /// Authorize dispensing on the rail the rental was paid through.
    ///
    /// Returns the service's text payload on success.
    pub async fn lend_power(&self, request: &LendPowerRequest) -> Result<Option<String>> {
        match request {
            LendPowerRequest::StripeTerminal(params) => {
                self.lend_power_stripe_terminal(params).await
            }
            LendPowerRequest::Nayax(params) => self.lend_power_nayax(params).await,
        }
    }

    /// Authorize dispensing after a Stripe Terminal payment.
    pub async fn lend_power_stripe_terminal(&self, params: &StringMap) -> Result<Option<String>> {
        let envelope =
            endpoints::lend_power_stripe_terminal(&self.transport, &self.base_url, params).await?;
        Ok(narrow(envelope, "lend_power_stripe_terminal", |e| {
            e.data.expect_text().map(str::to_string)
        }))
    }

    /// Authorize dispensing after a Nayax payment.
    pub async fn lend_power_nayax(&self, params: &ValueMap) -> Result<Option<String>> {
        let envelope = endpoints::lend_power_nayax(&self.transport, &self.base_url, params).await?;
        Ok(narrow(envelope, "lend_power_nayax", |e| {
            e.data.expect_text().map(str::to_string)
        }))
    }

    /// Fetch the pre-authorization amount and currency.
    pub async fn get_pre_amount(&self) -> Result<Option<StringMap>> {
        let envelope = endpoints::get_pre_amount(
            &self.transport,
            &self.base_url,
            self.secret_key.expose_secret(),
        )
        .await?;
        Ok(narrow(envelope, "get_pre_amount", |e| e.data.expect_string_map()))
    }

    /// Look up the terminal location for a cabinet. The envelope is returned as-is.
    pub async fn get_location_id(&self, qr_code: &str) -> Result<Option<ResponseEnvelope>> {
        endpoints::get_location_id(&self.transport, &self.base_url, qr_code).await
    }
}
