//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//! - Parse `key=value` request parameters.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not load the device config file (see `main`).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "powertap-cli")]
#[command(about = "PowerTap CLI - Call the power-bank rental backend from the command line", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  powertap-cli connection-token\n  powertap-cli qr-code --device-id 860000000000001\n  powertap-cli charge-rule --qr-code ABC123\n  powertap-cli lend --rail nayax --param qrCode=ABC123 --param amount=5\n"
)]
pub struct Cli {
    /// Base URL of the service, including any path prefix (e.g., https://api.example.com/power_bank)
    #[arg(short, long, global = true, env = "POWERTAP_BASE_URL")]
    pub base_url: Option<String>,

    /// Secret key issued for this terminal
    #[arg(short, long, global = true, env = "POWERTAP_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Path to the terminal's config.txt (overrides the default location)
    #[arg(long, global = true, env = "POWERTAP_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Accept any TLS certificate and hostname (permissive trust policy)
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Connect timeout in seconds
    #[arg(long, global = true, env = "POWERTAP_CONNECT_TIMEOUT")]
    pub connect_timeout: Option<u64>,

    /// Read timeout in seconds
    #[arg(long, global = true, env = "POWERTAP_READ_TIMEOUT")]
    pub read_timeout: Option<u64>,

    /// Write timeout in seconds
    #[arg(long, global = true, env = "POWERTAP_WRITE_TIMEOUT")]
    pub write_timeout: Option<u64>,

    /// Log every request and response at debug level (RUST_LOG takes precedence)
    #[arg(long, global = true, env = "POWERTAP_ENABLE_DEBUG")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a payment-terminal connection token
    ConnectionToken,

    /// Create a payment intent for a cabinet
    PaymentIntent {
        /// Cabinet QR code token
        #[arg(long)]
        qr_code: String,
    },

    /// Authorize power-bank dispensing after payment
    Lend {
        /// Payment rail the rental was paid through
        #[arg(long, value_enum)]
        rail: RailArg,

        /// Request body entry as key=value (repeatable)
        #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },

    /// Fetch the pre-authorization amount
    PreAmount,

    /// Fetch the advertising content version for a cabinet
    Version {
        #[arg(long)]
        qr_code: String,
    },

    /// Fetch the screen brightness schedule for a cabinet
    Brightness {
        #[arg(long)]
        qr_code: String,
    },

    /// Resolve a device id to its QR code token
    QrCode {
        /// Cabinet device id (fno)
        #[arg(long)]
        device_id: String,
    },

    /// Fetch the signed advertisement playlist (raw envelope)
    Ad {
        #[arg(long)]
        qr_code: String,

        /// Request timestamp in milliseconds since the Unix epoch
        #[arg(long, allow_hyphen_values = true)]
        timestamp: i64,

        /// Terminal IP address
        #[arg(long)]
        ip: String,

        /// Request signature
        #[arg(long)]
        sign: String,
    },

    /// Look up the terminal location for a cabinet (raw envelope)
    LocationId {
        #[arg(long)]
        qr_code: String,
    },

    /// Look up the order for a power bank (raw envelope)
    OrderInfo {
        #[arg(long)]
        power_bank_id: String,
    },

    /// Fetch the charge rule for a cabinet
    ChargeRule {
        #[arg(long)]
        qr_code: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RailArg {
    StripeTerminal,
    Nayax,
}

/// Parse a `key=value` pair. The value may itself contain `=`.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
