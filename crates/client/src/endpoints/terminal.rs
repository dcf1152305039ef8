//! Payment-terminal and power-dispensing routes.

use crate::endpoints::{endpoint_url, send_envelope_request};
use crate::envelope::ResponseEnvelope;
use crate::error::Result;
use crate::models::{StringMap, ValueMap};
use crate::transport::Transport;

/// Request a Stripe Terminal connection token.
pub async fn create_connection_token(
    transport: &Transport,
    base_url: &str,
    secret_key: &str,
) -> Result<Option<ResponseEnvelope>> {
    let url = endpoint_url(base_url, "pos/stripe/create_connection_token")?;
    let builder = transport.get(url).query(&[("key", secret_key)]);
    send_envelope_request(builder, "create_connection_token").await
}

/// Create a payment intent for the cabinet identified by `qr_code`.
pub async fn create_payment_intent(
    transport: &Transport,
    base_url: &str,
    secret_key: &str,
    qr_code: &str,
) -> Result<Option<ResponseEnvelope>> {
    let url = endpoint_url(base_url, "api/bankcard/stripe/createPaymentIntent4Terminal")?;
    let builder = transport
        .post(url)
        .query(&[("secretKey", secret_key), ("qrCode", qr_code)]);
    send_envelope_request(builder, "createPaymentIntent4Terminal").await
}

/// Look up the Stripe Terminal location for a cabinet.
pub async fn get_location_id(
    transport: &Transport,
    base_url: &str,
    qr_code: &str,
) -> Result<Option<ResponseEnvelope>> {
    let url = endpoint_url(base_url, "pos/power/get_location_id")?;
    let builder = transport.get(url).query(&[("qrCode", qr_code)]);
    send_envelope_request(builder, "get_location_id").await
}

/// Authorize dispensing after a Stripe Terminal payment.
pub async fn lend_power_stripe_terminal(
    transport: &Transport,
    base_url: &str,
    params: &StringMap,
) -> Result<Option<ResponseEnvelope>> {
    let url = endpoint_url(base_url, "pos/power/lend_power_stripe_terminal")?;
    let builder = transport.post(url).json(params);
    send_envelope_request(builder, "lend_power_stripe_terminal").await
}

/// Fetch the pre-authorization amount and currency.
pub async fn get_pre_amount(
    transport: &Transport,
    base_url: &str,
    secret_key: &str,
) -> Result<Option<ResponseEnvelope>> {
    let url = endpoint_url(base_url, "pos/power/get_pre_amount")?;
    let builder = transport.get(url).query(&[("secretKey", secret_key)]);
    send_envelope_request(builder, "get_pre_amount").await
}

/// Authorize dispensing after a Nayax payment.
pub async fn lend_power_nayax(
    transport: &Transport,
    base_url: &str,
    params: &ValueMap,
) -> Result<Option<ResponseEnvelope>> {
    let url = endpoint_url(base_url, "pos/power/lend_power_nayax")?;
    let builder = transport.post(url).json(params);
    send_envelope_request(builder, "lend_power_nayax").await
}
