use std::sync::Arc;
use std::sync::OnceLock;

use chrono::Duration;

use crate::jwt::IssuedToken;
use crate::jwt::TokenError;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    tokens: Arc<TokenService>,
    decoy_hash: OnceLock<String>,
}

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    pub fn new(password_hasher: PasswordHasher, tokens: Arc<TokenService>) -> Self {
        Self {
            password_hasher,
            tokens,
            decoy_hash: OnceLock::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for `username`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `username` - Subject of the issued token
    /// * `ttl` - Token lifetime
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or the hash is malformed)
    /// * `Token` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        username: &str,
        ttl: Duration,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.tokens.issue(username, ttl)?)
    }

    /// Spend a login attempt for an account that does not exist.
    ///
    /// Runs a full verification against a decoy hash with the same work
    /// factor, so the rejection takes as long as a wrong password would.
    pub fn reject_unknown(&self, password: &str) {
        let decoy = self.decoy_hash.get_or_init(|| {
            self.password_hasher
                .hash(DECOY_PASSWORD)
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Failed to hash decoy password");
                    String::new()
                })
        });
        let _ = self.password_hasher.verify(password, decoy);
    }
}
