//! API token storage
//!
//! Repository tokens are read from the configuration file (usually through
//! `${VAR}` substitution) and kept in a [`SecretString`]. The inner buffer
//! is zeroized on drop and `Debug` output is redacted, so a token never
//! ends up in a log line or a printed config summary.
//!
//! ```rust
//! use invenio_migrator::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let token = secret_string("zenodo-token".to_string());
//! assert_eq!(token.expose_secret().bearer(), "Bearer zenodo-token");
//! assert!(!format!("{token:?}").contains("zenodo-token"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroize;

/// Token text, wiped from memory when dropped
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl SecretValue {
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// `Authorization` header value for this token
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl Serialize for SecretValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Redacted, zeroizing token
pub type SecretString = Secret<SecretValue>;

/// Wraps a token
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}
