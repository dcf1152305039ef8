//! JSON output for command results.
//!
//! Invariants:
//! - Output is pretty-printed JSON on stdout.
//! - An absent result prints `null`.

use anyhow::Result;
use serde::Serialize;

/// Render a value as pretty-printed JSON.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Print a value as pretty-printed JSON to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", format_json(value)?);
    Ok(())
}
