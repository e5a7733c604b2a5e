//! Durable token storage trait.

use crate::{AuthToken, Result};

/// Durable client-side storage for the single bearer token.
///
/// Survives restarts on the same machine. Expiry is never checked here;
/// an expired token is only discovered when validation fails.
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any.
    fn load(&self) -> Result<Option<AuthToken>>;

    /// Store `token`, replacing any previous one.
    fn save(&self, token: &AuthToken) -> Result<()>;

    /// Remove the stored token. Removing a missing token is not an error.
    fn remove(&self) -> Result<()>;
}
