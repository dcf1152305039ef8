//! Cabinet advertising and display configuration routes.

use crate::endpoints::{endpoint_url, send_envelope_request};
use crate::envelope::ResponseEnvelope;
use crate::error::Result;
use crate::transport::Transport;

/// Get the advertising content version for a cabinet.
pub async fn get_version(
    transport: &Transport,
    base_url: &str,
    qr_code: &str,
) -> Result<Option<ResponseEnvelope>> {
    let url = endpoint_url(base_url, "cabinet/advertising/getVersion")?;
    let builder = transport.get(url).query(&[("qrCode", qr_code)]);
    send_envelope_request(builder, "getVersion").await
}

/// Get the screen brightness schedule for a cabinet.
pub async fn get_brightness_config(
    transport: &Transport,
    base_url: &str,
    qr_code: &str,
) -> Result<Option<ResponseEnvelope>> {
    let url = endpoint_url(base_url, "cabinet/advertising/getBrightnessConfig")?;
    let builder = transport.get(url).query(&[("qrCode", qr_code)]);
    send_envelope_request(builder, "getBrightnessConfig").await
}

/// Resolve a cabinet's device id (`fno`) to its QR code token.
pub async fn get_qr_code(
    transport: &Transport,
    base_url: &str,
    device_id: &str,
) -> Result<Option<ResponseEnvelope>> {
    let url = endpoint_url(base_url, "cabinet/advertising/cabinet_advertising")?;
    let builder = transport.get(url).query(&[("fno", device_id)]);
    send_envelope_request(builder, "cabinet_advertising").await
}

/// Fetch the signed advertisement playlist for a cabinet.
pub async fn get_ad(
    transport: &Transport,
    base_url: &str,
    qr_code: &str,
    timestamp: i64,
    ip: &str,
    signature: &str,
) -> Result<Option<ResponseEnvelope>> {
    let url = endpoint_url(base_url, "cabinet/advertising/get")?;
    let timestamp = timestamp.to_string();
    let builder = transport.get(url).query(&[
        ("qrCode", qr_code),
        ("timestamp", timestamp.as_str()),
        ("ip", ip),
        ("sign", signature),
    ]);
    send_envelope_request(builder, "advertising_get").await
}
