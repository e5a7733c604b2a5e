//! Bearer token type.

use std::fmt;

/// The fixed storage key the bearer token is persisted under.
pub const TOKEN_KEY: &str = "auth_token";

/// A bearer token issued by the backend after the Discord OAuth exchange.
///
/// The token is a signed JWT. The client decodes its payload once, on the
/// OAuth callback, and otherwise treats it as opaque.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Only read when building an authorization header or persisting it
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Create a new token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token value.
    ///
    /// # Security
    ///
    /// Use only when constructing authorization headers or writing storage.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthToken").field(&"[REDACTED]").finish()
    }
}
