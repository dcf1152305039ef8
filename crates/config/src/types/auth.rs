//! Authentication types for PowerTap configuration.
//!
//! Responsibilities:
//! - Hold the process-wide service secret key.
//! - Handle serialization of the secret value.
//!
//! Does NOT handle:
//! - Injecting the key into requests (see client crate endpoints).
//!
//! Invariants:
//! - The secret key uses `secrecy::SecretString` to prevent accidental logging.
//! - Serialization includes the secret; secrecy is for runtime safety.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Module for serializing SecretString as strings.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// Authentication configuration.
///
/// The service authenticates terminals with a single shared secret that is
/// sent as a plain request parameter on every authenticated call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Terminal secret key.
    #[serde(rename = "secretKey", with = "secret_string")]
    pub secret_key: SecretString,
}
