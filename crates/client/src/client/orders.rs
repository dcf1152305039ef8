//! Order and pricing API methods for [`PowerTapClient`].

use crate::client::{PowerTapClient, narrow};
use crate::endpoints;
use crate::envelope::ResponseEnvelope;
use crate::error::Result;
use crate::models::ChargeRule;

impl PowerTapClient {
    /// Look up the order for a power bank. The envelope is returned as-is.
    pub async fn get_order_info_by_power_bank_id(
        &self,
        power_bank_id: &str,
    ) -> Result<Option<ResponseEnvelope>> {
        endpoints::get_order_info_by_power_bank_id(&self.transport, &self.base_url, power_bank_id)
            .await
    }

    /// Fetch the charge rule for a cabinet.
    pub async fn get_charge_rule(&self, qr_code: &str) -> Result<Option<ChargeRule>> {
        let envelope = endpoints::get_charge_rule(&self.transport, &self.base_url, qr_code).await?;
        Ok(narrow(envelope, "getChargeRuleByQrCode", |e| {
            e.data.expect_map().map(ChargeRule::from_map)
        }))
    }
}
