//! PowerTap CLI - Command-line access to the power-bank rental backend.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Build configuration from the terminal's device file, environment and flags.
//! - Call the backend via the shared client library and print results as JSON.
//!
//! Does NOT handle:
//! - Request construction or envelope narrowing (see `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Precedence is device file, then environment, then command-line flags.
//! - Logs go to stderr; stdout carries only command output.

mod args;
mod dispatch;
mod error;
mod output;

use std::time::Duration;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use powertap_client::PowerTapClient;
use powertap_config::{Config, ConfigError, ConfigLoader, TrustPolicy};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match build_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to build configuration: {:#}", e);
            std::process::exit(ExitCode::ValidationError.as_i32());
        }
    };

    if config.connection.trust_policy.is_permissive() {
        tracing::warn!(
            "TLS verification is disabled. Use the permissive trust policy only against test backends."
        );
    }

    let client = match PowerTapClient::builder().from_config(&config).build() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {:#}", e);
            std::process::exit(ExitCode::from(&e).as_i32());
        }
    };

    let exit_code = match run_command(cli.command, &client).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Layer the device file, environment and command-line flags into a [`Config`].
fn build_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut loader = ConfigLoader::new();

    // Blank values are ignored so the env var or default location still applies
    if let Some(ref path) = cli.config_path {
        if !path.to_string_lossy().trim().is_empty() {
            loader = loader.with_config_path(path.clone());
        }
    }

    loader = loader.from_device_file()?.from_env()?;

    if let Some(ref url) = cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(ref key) = cli.secret_key {
        loader = loader.with_secret_key(key.clone());
    }
    if cli.insecure {
        loader = loader.with_trust_policy(TrustPolicy::Permissive);
    }
    if let Some(secs) = cli.connect_timeout {
        loader = loader.with_connect_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = cli.read_timeout {
        loader = loader.with_read_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = cli.write_timeout {
        loader = loader.with_write_timeout(Duration::from_secs(secs));
    }

    loader.build()
}
