//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching client operation.
//! - Convert `key=value` parameters into request bodies per payment rail.
//! - Print each result as JSON.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()`).
//!
//! Invariants:
//! - A result the service reports as failed prints `null` and still succeeds;
//!   only transport and configuration failures are errors.

use anyhow::{Context, Result};
use powertap_client::{LendPowerRequest, PowerTapClient, StringMap, ValueMap};
use serde_json::Value;
use tracing::info;

use crate::args::{Commands, RailArg};
use crate::output::print_json;

/// Dispatch a parsed command to the client.
pub(crate) async fn run_command(command: Commands, client: &PowerTapClient) -> Result<()> {
    match command {
        Commands::ConnectionToken => {
            let token = client.create_connection_token().await?;
            print_json(&token)?;
        }
        Commands::PaymentIntent { qr_code } => {
            print_json(&client.create_payment_intent(&qr_code).await?)?;
        }
        Commands::Lend { rail, params } => {
            let request = build_lend_request(rail, params);
            info!(rail = ?request.rail(), "Requesting power bank");
            print_json(&client.lend_power(&request).await?)?;
        }
        Commands::PreAmount => {
            print_json(&client.get_pre_amount().await?)?;
        }
        Commands::Version { qr_code } => {
            print_json(&client.get_version(&qr_code).await?)?;
        }
        Commands::Brightness { qr_code } => {
            print_json(&client.get_brightness_config(&qr_code).await?)?;
        }
        Commands::QrCode { device_id } => {
            print_json(&client.get_qr_code(&device_id).await?)?;
        }
        Commands::Ad {
            qr_code,
            timestamp,
            ip,
            sign,
        } => {
            let envelope = client
                .get_ad(&qr_code, timestamp, &ip, &sign)
                .await
                .context("Failed to fetch advertisements")?;
            print_json(&envelope)?;
        }
        Commands::LocationId { qr_code } => {
            print_json(&client.get_location_id(&qr_code).await?)?;
        }
        Commands::OrderInfo { power_bank_id } => {
            print_json(&client.get_order_info_by_power_bank_id(&power_bank_id).await?)?;
        }
        Commands::ChargeRule { qr_code } => {
            print_json(&client.get_charge_rule(&qr_code).await?)?;
        }
    }
    Ok(())
}

/// Build the dispensing request body for the chosen rail.
///
/// Stripe Terminal bodies are string-valued. Nayax values are sent as JSON
/// when they parse as JSON, and as strings otherwise.
fn build_lend_request(rail: RailArg, params: Vec<(String, String)>) -> LendPowerRequest {
    match rail {
        RailArg::StripeTerminal => {
            LendPowerRequest::StripeTerminal(params.into_iter().collect::<StringMap>())
        }
        RailArg::Nayax => LendPowerRequest::Nayax(
            params
                .into_iter()
                .map(|(key, raw)| {
                    let value = serde_json::from_str::<Value>(&raw).unwrap_or(Value::String(raw));
                    (key, value)
                })
                .collect::<ValueMap>(),
        ),
    }
}
