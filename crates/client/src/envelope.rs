//! The uniform response wrapper returned by every service route.
//!
//! Responsibilities:
//! - Deserialize `{code, message, data}` with missing fields tolerated.
//! - Model `data` as a closed set of shapes and narrow it explicitly.
//!
//! Does NOT handle:
//! - Deciding what a given route's `data` should look like (see `crate::client`).
//!
//! Invariants:
//! - `code == 200` is the only success value; any other code is an application
//!   failure and is still a successfully decoded envelope.
//! - Narrowing never panics. A shape the caller did not expect is reported as
//!   [`PayloadMismatch`].

use powertap_config::constants::SUCCESS_CODE;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::models::{StringMap, ValueMap};

/// Response wrapper shared by every route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default)]
    pub data: Payload,
}

impl ResponseEnvelope {
    /// Returns true if the service reported success.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The polymorphic `data` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// `null` or missing.
    #[default]
    Absent,
    Text(String),
    Map(ValueMap),
    /// Numbers, booleans and arrays.
    Other(Value),
}

/// Shape names used in mismatch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    Absent,
    Text,
    Map,
    Other,
}

impl fmt::Display for PayloadShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("absent"),
            Self::Text => f.write_str("text"),
            Self::Map => f.write_str("map"),
            Self::Other => f.write_str("other"),
        }
    }
}

/// The payload did not have the shape the call site expected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("expected {expected} payload, found {found}")]
pub struct PayloadMismatch {
    pub expected: PayloadShape,
    pub found: PayloadShape,
}

impl Payload {
    pub fn shape(&self) -> PayloadShape {
        match self {
            Self::Absent => PayloadShape::Absent,
            Self::Text(_) => PayloadShape::Text,
            Self::Map(_) => PayloadShape::Map,
            Self::Other(_) => PayloadShape::Other,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    fn mismatch(&self, expected: PayloadShape) -> PayloadMismatch {
        PayloadMismatch {
            expected,
            found: self.shape(),
        }
    }

    /// Narrow to a string payload.
    pub fn expect_text(&self) -> Result<&str, PayloadMismatch> {
        match self {
            Self::Text(text) => Ok(text),
            other => Err(other.mismatch(PayloadShape::Text)),
        }
    }

    /// Narrow to an object payload with arbitrary values.
    pub fn expect_map(&self) -> Result<&ValueMap, PayloadMismatch> {
        match self {
            Self::Map(map) => Ok(map),
            other => Err(other.mismatch(PayloadShape::Map)),
        }
    }

    /// Narrow to an object payload and flatten its values to strings.
    ///
    /// Strings are kept as-is, numbers and booleans are rendered as text,
    /// and null, array or object values are dropped.
    pub fn expect_string_map(&self) -> Result<StringMap, PayloadMismatch> {
        let map = self.expect_map()?;
        Ok(map
            .iter()
            .filter_map(|(key, value)| scalar_to_string(value).map(|v| (key.clone(), v)))
            .collect())
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
