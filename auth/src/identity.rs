/// Identity of the caller, derived from a validated token.
///
/// Only the token service can construct one, so holding an
/// `AuthenticatedIdentity` means a token was checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    username: String,
}

impl AuthenticatedIdentity {
    pub(crate) fn new(username: String) -> Self {
        Self { username }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}
