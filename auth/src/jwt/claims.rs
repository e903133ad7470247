use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an identity token.
///
/// Every field is required; a token missing any of them does not decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Username of the subject the token was issued to
    pub username: String,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl TokenClaims {
    /// Build claims for `username`, valid from `now` for `ttl`.
    ///
    /// Timestamps are truncated to whole seconds before the expiry is computed.
    pub fn new(username: impl Into<String>, ttl: Duration, now: DateTime<Utc>) -> Self {
        let iat = now.timestamp();

        Self {
            username: username.into(),
            iat,
            exp: iat + ttl.num_seconds(),
        }
    }

    /// A token stops being valid at the exact second it expires.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
