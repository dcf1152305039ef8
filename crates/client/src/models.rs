//! Request and response models for the PowerTap service.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Object payload flattened to string values.
pub type StringMap = HashMap<String, String>;

/// Object payload with arbitrary JSON values.
pub type ValueMap = serde_json::Map<String, Value>;

/// Suffix shown next to the daily cap.
pub const DAY_LABEL: &str = "/1 Day";

/// The payment path a rental was paid through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentRail {
    /// Stripe Terminal card reader; the request body is string-valued.
    StripeTerminal,
    /// Nayax reader; the request body may carry arbitrary JSON values.
    Nayax,
}

/// A power-dispensing authorization, paired with the rail that paid for it.
#[derive(Debug, Clone, PartialEq)]
pub enum LendPowerRequest {
    StripeTerminal(StringMap),
    Nayax(ValueMap),
}

impl LendPowerRequest {
    pub fn rail(&self) -> PaymentRail {
        match self {
            Self::StripeTerminal(_) => PaymentRail::StripeTerminal,
            Self::Nayax(_) => PaymentRail::Nayax,
        }
    }
}

/// Pricing rule for a cabinet, looked up by QR code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRule {
    /// Daily cap.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub max_per_money: f64,
    /// Price per billing unit.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub one_money_unit: f64,
    /// Billing unit length in minutes.
    #[serde(default = "default_hour_unit", deserialize_with = "lenient_hour_unit")]
    pub hour_unit: i64,
    /// Fee charged when the power bank is not returned.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub report_loss: f64,
}

impl Default for ChargeRule {
    fn default() -> Self {
        Self {
            max_per_money: 0.0,
            one_money_unit: 0.0,
            hour_unit: default_hour_unit(),
            report_loss: 0.0,
        }
    }
}

impl ChargeRule {
    /// Read a rule from an object payload. Missing or non-numeric fields take
    /// their defaults.
    pub fn from_map(map: &ValueMap) -> Self {
        serde_json::from_value(Value::Object(map.clone())).unwrap_or_default()
    }

    /// Billing unit suffix: `/1 Hour` for sixty minutes, otherwise `/{n} Min`.
    pub fn unit_label(&self) -> String {
        if self.hour_unit == 60 {
            "/1 Hour".to_string()
        } else {
            format!("/{} Min", self.hour_unit)
        }
    }
}

/// Render an amount with two decimals followed by the currency symbol.
pub fn format_price(amount: f64, currency_symbol: &str) -> String {
    format!("{amount:.2}{currency_symbol}")
}

fn default_hour_unit() -> i64 {
    1
}

fn number_from(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from(&value).unwrap_or(0.0))
}

fn lenient_hour_unit<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from(&value)
        .map(|n| n as i64)
        .unwrap_or_else(default_hour_unit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_charge_rule_defaults_for_missing_fields() {
        let rule: ChargeRule = serde_json::from_value(json!({})).unwrap();
        assert_eq!(rule, ChargeRule::default());
        assert_eq!(rule.hour_unit, 1);
    }

    #[test]
    fn test_charge_rule_accepts_numeric_strings() {
        let rule: ChargeRule = serde_json::from_value(json!({
            "maxPerMoney": "20",
            "oneMoneyUnit": 2.5,
            "hourUnit": 60,
            "reportLoss": "abc"
        }))
        .unwrap();

        assert_eq!(rule.max_per_money, 20.0);
        assert_eq!(rule.one_money_unit, 2.5);
        assert_eq!(rule.hour_unit, 60);
        assert_eq!(rule.report_loss, 0.0);
    }

    #[test]
    fn test_charge_rule_from_map() {
        let map = json!({"maxPerMoney": 10, "hourUnit": "30", "extra": [1]});
        let rule = ChargeRule::from_map(map.as_object().unwrap());
        assert_eq!(rule.max_per_money, 10.0);
        assert_eq!(rule.hour_unit, 30);
        assert_eq!(rule.one_money_unit, 0.0);
    }

    #[test]
    fn test_unit_label() {
        let hourly = ChargeRule {
            hour_unit: 60,
            ..ChargeRule::default()
        };
        assert_eq!(hourly.unit_label(), "/1 Hour");

        let half = ChargeRule {
            hour_unit: 30,
            ..ChargeRule::default()
        };
        assert_eq!(half.unit_label(), "/30 Min");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(5.0, "$"), "5.00$");
        assert_eq!(format_price(2.5, "€"), "2.50€");
    }

    #[test]
    fn test_lend_power_request_rail() {
        assert_eq!(
            LendPowerRequest::StripeTerminal(StringMap::new()).rail(),
            PaymentRail::StripeTerminal
        );
        assert_eq!(
            LendPowerRequest::Nayax(ValueMap::new()).rail(),
            PaymentRail::Nayax
        );
    }
}
