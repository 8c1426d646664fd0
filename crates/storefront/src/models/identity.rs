//! Identity attached to requests that passed the auth gate.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Decoded payload of a verified bearer token.
///
/// Lives in the request extensions for the duration of one request and is
/// never persisted. Claims other than `sub` and `exp` are defined by the
/// issuer and kept as opaque JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedIdentity {
    /// Subject (the issuer's user identifier).
    pub sub: String,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    #[serde(flatten)]
    pub claims: HashMap<String, Value>,
}

impl AuthenticatedIdentity {
    /// Expiry as a timestamp, if representable.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// String-valued claim such as `email` or `name`.
    #[must_use]
    pub fn claim_str(&self, key: &str) -> Option<&str> {
        self.claims.get(key).and_then(Value::as_str)
    }
}
