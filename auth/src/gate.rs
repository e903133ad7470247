use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::identity::AuthenticatedIdentity;
use crate::jwt::TokenService;

const BEARER_PREFIX: &str = "Bearer ";

/// Whether a route may be called without a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
}

/// Rejection produced by the gate.
///
/// Missing, unreadable, expired and forged tokens all end up here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("Unauthorized")]
    Unauthenticated,
}

/// Static mapping of route identifier to visibility.
///
/// Routes without an entry are protected.
#[derive(Debug, Clone)]
pub struct AccessPolicy<R> {
    rules: HashMap<R, Visibility>,
}

impl<R> AccessPolicy<R>
where
    R: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Set the visibility of one route, replacing any earlier entry.
    pub fn with_rule(mut self, route: R, visibility: Visibility) -> Self {
        self.rules.insert(route, visibility);
        self
    }

    pub fn visibility(&self, route: R) -> Visibility {
        self.rules
            .get(&route)
            .copied()
            .unwrap_or(Visibility::Protected)
    }
}

impl<R> Default for AccessPolicy<R>
where
    R: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R> FromIterator<(R, Visibility)> for AccessPolicy<R>
where
    R: Copy + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (R, Visibility)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

/// Decides whether a request may proceed and under which identity.
///
/// Pure decision logic: reads the policy and the token service, touches no
/// storage.
pub struct AuthorizationGate<R> {
    policy: AccessPolicy<R>,
    tokens: Arc<TokenService>,
}

impl<R> AuthorizationGate<R>
where
    R: Copy + Eq + Hash + fmt::Debug,
{
    pub fn new(policy: AccessPolicy<R>, tokens: Arc<TokenService>) -> Self {
        Self { policy, tokens }
    }

    pub fn classify(&self, route: R) -> Visibility {
        self.policy.visibility(route)
    }

    /// Authorize a call to `route` carrying the raw `Authorization` header.
    ///
    /// # Returns
    /// `None` for public routes (the header is not inspected), the caller's
    /// identity for protected routes.
    ///
    /// # Errors
    /// * `Unauthenticated` - Protected route with a missing or invalid token
    pub fn authorize(
        &self,
        route: R,
        authorization: Option<&str>,
    ) -> Result<Option<AuthenticatedIdentity>, GateError> {
        if self.classify(route) == Visibility::Public {
            return Ok(None);
        }

        let token = authorization
            .map(|value| value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                tracing::debug!(route = ?route, "Protected route called without a token");
                GateError::Unauthenticated
            })?;

        self.tokens
            .validate(token)
            .map(Some)
            .map_err(|_| {
                tracing::warn!(route = ?route, "Token validation failed");
                GateError::Unauthenticated
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    const SECRET: &[u8] = b"gate_test_secret_at_least_32_bytes!";

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestRoute {
        Login,
        AddArticle,
        Unlisted,
    }

    fn gate() -> (AuthorizationGate<TestRoute>, Arc<TokenService>) {
        let tokens = Arc::new(TokenService::new(SECRET));
        let policy = AccessPolicy::new()
            .with_rule(TestRoute::Login, Visibility::Public)
            .with_rule(TestRoute::AddArticle, Visibility::Protected);
        (AuthorizationGate::new(policy, Arc::clone(&tokens)), tokens)
    }

    #[test]
    fn test_classify() {
        let (gate, _) = gate();

        assert_eq!(gate.classify(TestRoute::Login), Visibility::Public);
        assert_eq!(gate.classify(TestRoute::AddArticle), Visibility::Protected);
        assert_eq!(gate.classify(TestRoute::Unlisted), Visibility::Protected);
    }

    #[test]
    fn test_public_route_ignores_header() {
        let (gate, _) = gate();

        assert_eq!(gate.authorize(TestRoute::Login, None), Ok(None));
        assert_eq!(gate.authorize(TestRoute::Login, Some("garbage")), Ok(None));
    }

    #[test]
    fn test_protected_route_without_token() {
        let (gate, _) = gate();

        assert_eq!(
            gate.authorize(TestRoute::AddArticle, None),
            Err(GateError::Unauthenticated)
        );
        assert_eq!(
            gate.authorize(TestRoute::AddArticle, Some("")),
            Err(GateError::Unauthenticated)
        );
        assert_eq!(
            gate.authorize(TestRoute::AddArticle, Some("Bearer ")),
            Err(GateError::Unauthenticated)
        );
    }

    #[test]
    fn test_protected_route_with_invalid_token() {
        let (gate, _) = gate();

        assert_eq!(
            gate.authorize(TestRoute::AddArticle, Some("invalid.token.here")),
            Err(GateError::Unauthenticated)
        );
    }

    #[test]
    fn test_protected_route_with_expired_token() {
        let (gate, tokens) = gate();
        let issued = tokens
            .issue_at(
                "alice",
                Duration::hours(1),
                chrono::Utc::now() - Duration::hours(2),
            )
            .unwrap();

        assert_eq!(
            gate.authorize(TestRoute::AddArticle, Some(&issued.token)),
            Err(GateError::Unauthenticated)
        );
    }

    #[test]
    fn test_protected_route_with_valid_token() {
        let (gate, tokens) = gate();
        let issued = tokens.issue("alice", Duration::hours(1)).unwrap();

        let raw = gate
            .authorize(TestRoute::AddArticle, Some(&issued.token))
            .unwrap()
            .expect("Protected route should yield an identity");
        assert_eq!(raw.username(), "alice");

        let bearer = gate
            .authorize(
                TestRoute::Unlisted,
                Some(&format!("Bearer {}", issued.token)),
            )
            .unwrap()
            .expect("Protected route should yield an identity");
        assert_eq!(bearer.username(), "alice");
    }

    #[test]
    fn test_policy_from_iterator_last_rule_wins() {
        let policy: AccessPolicy<TestRoute> = [
            (TestRoute::Unlisted, Visibility::Protected),
            (TestRoute::Unlisted, Visibility::Public),
        ]
        .into_iter()
        .collect();

        assert_eq!(policy.visibility(TestRoute::Unlisted), Visibility::Public);
    }
}
