//! Passwords and bearer tokens held in memory
//!
//! Both travel as [`SecretString`]: the buffer is zeroed on drop and `Debug`
//! prints `[REDACTED]`. Reading the value takes an explicit
//! `expose_secret()`, so the few places that need it are easy to find.
//!
//! ```rust
//! use fieldservice::config::{bearer, secret_string};
//! use secrecy::ExposeSecret;
//!
//! let token = secret_string("eyJhbGciOi...".to_string());
//! assert_eq!(token.expose_secret().as_ref(), "eyJhbGciOi...");
//! assert_eq!(bearer(&token), "Bearer eyJhbGciOi...");
//! assert!(!format!("{token:?}").contains("eyJ"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, ExposeSecret, Secret};
use serde::{Deserialize, Deserializer};
use zeroize::Zeroize;

/// Token or password text
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// `access_token` arrives in the login response body
impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

pub type SecretString = Secret<SecretValue>;

#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// `Authorization` header value for a session token
pub fn bearer(token: &SecretString) -> String {
    format!("Bearer {}", token.expose_secret().as_ref())
}
