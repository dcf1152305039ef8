//! Order lookup and pricing routes.

use crate::endpoints::{endpoint_url, root_url, send_envelope_request};
use crate::envelope::ResponseEnvelope;
use crate::error::Result;
use crate::transport::Transport;

/// Look up the open order for a power bank.
pub async fn get_order_info_by_power_bank_id(
    transport: &Transport,
    base_url: &str,
    power_bank_id: &str,
) -> Result<Option<ResponseEnvelope>> {
    let url = endpoint_url(base_url, "api/borrow/getOrderInfoByPowerBankId")?;
    let builder = transport.get(url).query(&[("powerBankId", power_bank_id)]);
    send_envelope_request(builder, "getOrderInfoByPowerBankId").await
}

/// Fetch the charge rule for a cabinet.
///
/// This route hangs off the host root, not the base URL's path prefix.
pub async fn get_charge_rule(
    transport: &Transport,
    base_url: &str,
    qr_code: &str,
) -> Result<Option<ResponseEnvelope>> {
    let url = root_url(base_url, ["getChargeRuleByQrCode", qr_code])?;
    let builder = transport.get(url);
    send_envelope_request(builder, "getChargeRuleByQrCode").await
}
