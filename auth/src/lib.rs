//! Authentication utilities library
//!
//! Credential lifecycle and access-control building blocks:
//! - Password hashing (Argon2id, tunable work factor)
//! - Signed, time-bounded identity tokens (JWT, HS256)
//! - An authorization gate applying a per-route public/protected policy
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenService;
//! use chrono::Duration;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!");
//! let issued = tokens.issue("alice", Duration::hours(24)).unwrap();
//! let identity = tokens.validate(&issued.token).unwrap();
//! assert_eq!(identity.username(), "alice");
//! ```
//!
//! ## Gate
//! ```
//! use std::sync::Arc;
//!
//! use auth::{AccessPolicy, AuthorizationGate, TokenService, Visibility};
//!
//! let tokens = Arc::new(TokenService::new(b"secret_key_at_least_32_bytes_long!"));
//! let policy = AccessPolicy::new()
//!     .with_rule("login", Visibility::Public)
//!     .with_rule("addArticle", Visibility::Protected);
//! let gate = AuthorizationGate::new(policy, tokens);
//!
//! assert!(gate.authorize("login", None).unwrap().is_none());
//! assert!(gate.authorize("addArticle", None).is_err());
//! ```

pub mod authenticator;
pub mod gate;
pub mod identity;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use gate::AccessPolicy;
pub use gate::AuthorizationGate;
pub use gate::GateError;
pub use gate::Visibility;
pub use identity::AuthenticatedIdentity;
pub use jwt::IssuedToken;
pub use jwt::TokenClaims;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::WorkFactor;
