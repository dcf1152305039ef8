//! Advertising and display API methods for [`PowerTapClient`].

use serde_json::Value;

use crate::client::{PowerTapClient, narrow};
use crate::endpoints;
use crate::envelope::ResponseEnvelope;
use crate::error::Result;
use crate::models::ValueMap;

impl PowerTapClient {
    /// Get the advertising content version for a cabinet.
    pub async fn get_version(&self, qr_code: &str) -> Result<Option<ValueMap>> {
        let envelope = endpoints::get_version(&self.transport, &self.base_url, qr_code).await?;
        Ok(narrow(envelope, "getVersion", |e| e.data.expect_map().cloned()))
    }

    /// Get the screen brightness schedule for a cabinet.
    pub async fn get_brightness_config(&self, qr_code: &str) -> Result<Option<ValueMap>> {
        let envelope =
            endpoints::get_brightness_config(&self.transport, &self.base_url, qr_code).await?;
        Ok(narrow(envelope, "getBrightnessConfig", |e| {
            e.data.expect_map().cloned()
        }))
    }

    /// Resolve a cabinet's device id to its QR code token.
    ///
    /// Returns `None` when the service fails or the `qrCode` field is missing.
    pub async fn get_qr_code(&self, device_id: &str) -> Result<Option<String>> {
        let envelope = endpoints::get_qr_code(&self.transport, &self.base_url, device_id).await?;
        Ok(narrow(envelope, "cabinet_advertising", |e| {
            e.data
                .expect_map()
                .map(|map| map.get("qrCode").and_then(Value::as_str).map(str::to_string))
        })
        .flatten())
    }

    /// Fetch the signed advertisement playlist. The envelope is returned as-is.
    pub async fn get_ad(
        &self,
        qr_code: &str,
        timestamp: i64,
        ip: &str,
        signature: &str,
    ) -> Result<Option<ResponseEnvelope>> {
        endpoints::get_ad(
            &self.transport,
            &self.base_url,
            qr_code,
            timestamp,
            ip,
            signature,
        )
        .await
    }
}
