use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::errors::TokenError;
use crate::identity::AuthenticatedIdentity;

/// A freshly signed token and the instant it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and validates signed, time-bounded identity tokens (HS256).
///
/// The signing key is fixed at construction and never changes for the
/// lifetime of the service. There is no revocation: a token is valid until
/// its `exp` claim passes.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenService {
    /// Create a token service with a secret signing key.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load it from configuration or a secret store, never from code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token for `username` valid for `ttl` from now.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue(&self, username: &str, ttl: Duration) -> Result<IssuedToken, TokenError> {
        self.issue_at(username, ttl, Utc::now())
    }

    /// Issue a token for `username` valid for `ttl` from `now`.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue_at(
        &self,
        username: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let claims = TokenClaims::new(username, ttl, now);
        let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or_else(|| {
            TokenError::SigningFailed(format!("Expiry out of range: {}", claims.exp))
        })?;

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Validate a token against the current time.
    ///
    /// # Errors
    /// * `Invalid` - Signature, structure or expiry check failed
    pub fn validate(&self, token: &str) -> Result<AuthenticatedIdentity, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as of `now`.
    ///
    /// The token is accepted only if its signature verifies under this
    /// service's key, its claims decode, and `now` is strictly before `exp`.
    ///
    /// # Errors
    /// * `Invalid` - Signature, structure or expiry check failed
    pub fn validate_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticatedIdentity, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against `now`, with no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => {
                        tracing::debug!("Token rejected: signature mismatch")
                    }
                    _ => tracing::debug!(error = %e, "Token rejected: malformed"),
                }
                TokenError::Invalid
            })?
            .claims;

        if claims.is_expired(now.timestamp()) {
            tracing::debug!(
                username = %claims.username,
                exp = claims.exp,
                "Token rejected: expired"
            );
            return Err(TokenError::Invalid);
        }

        Ok(AuthenticatedIdentity::new(claims.username))
    }
}
