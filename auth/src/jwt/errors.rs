use thiserror::Error;

/// Error type for token operations.
///
/// Validation failures are deliberately a single variant: callers learn that a
/// token was refused, never why.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is invalid")]
    Invalid,
}
