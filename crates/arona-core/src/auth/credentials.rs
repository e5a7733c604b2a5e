//! The two ways a browser session proves who it is.

use std::fmt;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::Result;
use crate::error::AuthError;
use crate::store::TokenService;
use crate::traits::DashboardApi;
use crate::types::UserProfile;

/// Which mechanism a [`CredentialSource`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    /// JWT in the `Authorization` header, validated via `/api/validate-token`.
    BearerToken,
    /// Server-side session cookie, probed via `/api/user`.
    CookieSession,
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialKind::BearerToken => f.write_str("bearer token"),
            CredentialKind::CookieSession => f.write_str("cookie session"),
        }
    }
}

/// A credential mechanism the session manager can validate and revoke.
#[async_trait]
pub trait CredentialSource: Send + Sync + fmt::Debug {
    fn kind(&self) -> CredentialKind;

    /// Ask the backend who this credential belongs to.
    ///
    /// Returns `Ok(None)` when no credential is held, without making a
    /// request.
    async fn identify(&self, api: &dyn DashboardApi) -> Result<Option<UserProfile>>;

    /// Invalidate the credential.
    async fn revoke(&self, api: &dyn DashboardApi) -> Result<()>;
}

/// Bearer token kept in the [`TokenService`].
#[derive(Debug, Clone)]
pub struct BearerToken {
    tokens: TokenService,
}

impl BearerToken {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl CredentialSource for BearerToken {
    fn kind(&self) -> CredentialKind {
        CredentialKind::BearerToken
    }

    #[instrument(skip_all)]
    async fn identify(&self, api: &dyn DashboardApi) -> Result<Option<UserProfile>> {
        if self.tokens.get()?.is_none() {
            debug!("No stored token, skipping validation");
            return Ok(None);
        }

        match api.validate_token().await {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                warn!(error = %e, "Token validation failed, clearing token");
                self.tokens.clear()?;
                if e.is_auth_error() {
                    Err(AuthError::TokenRejected.into())
                } else {
                    Err(e)
                }
            }
        }
    }

    async fn revoke(&self, _api: &dyn DashboardApi) -> Result<()> {
        self.tokens.clear()
    }
}

/// Cookie session held by the HTTP client's cookie jar.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieSession;

#[async_trait]
impl CredentialSource for CookieSession {
    fn kind(&self) -> CredentialKind {
        CredentialKind::CookieSession
    }

    #[instrument(skip_all)]
    async fn identify(&self, api: &dyn DashboardApi) -> Result<Option<UserProfile>> {
        api.current_user().await.map(Some)
    }

    #[instrument(skip_all)]
    async fn revoke(&self, api: &dyn DashboardApi) -> Result<()> {
        api.logout().await
    }
}
