//! Auth session lifecycle: initial check, per-navigation check, OAuth
//! callback and logout.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::routes::Route;
use crate::store::TokenService;
use crate::traits::DashboardApi;
use crate::types::UserProfile;
use crate::{AuthToken, Result};

use super::credentials::{BearerToken, CookieSession, CredentialSource};
use super::jwt;

/// Session state for the lifetime of one page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The first validation has not finished yet.
    Unknown,
    /// Validated; carries the profile the backend returned.
    Authenticated(UserProfile),
    /// No valid credential.
    Unauthenticated,
}

impl SessionState {
    /// `None` while unknown, otherwise whether the user is signed in.
    pub fn is_authenticated(&self) -> Option<bool> {
        match self {
            SessionState::Unknown => None,
            SessionState::Authenticated(_) => Some(true),
            SessionState::Unauthenticated => Some(false),
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            SessionState::Authenticated(profile) => Some(profile),
            _ => None,
        }
    }
}

/// Why an OAuth callback could not be completed.
#[derive(Debug, thiserror::Error)]
pub enum CallbackError {
    /// The callback URL carried no `token` parameter.
    #[error("No authentication token received")]
    MissingToken,

    /// The token payload could not be decoded, or storing it failed.
    #[error("Authentication failed")]
    Failed(#[source] crate::Error),
}

/// A browser navigation requested by the session manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Client-side route change.
    Push(Route),
    /// Full page load, dropping all in-memory state.
    Hard(Route),
}

impl Navigation {
    pub fn route(&self) -> Route {
        match self {
            Navigation::Push(route) | Navigation::Hard(route) => *route,
        }
    }
}

/// Owns the session state and every transition of it.
///
/// Transitions only happen in response to events: page load
/// ([`initialize`](Self::initialize)), navigation
/// ([`on_navigate`](Self::on_navigate)), the OAuth return leg
/// ([`complete_oauth`](Self::complete_oauth)) and
/// [`logout`](Self::logout). Concurrent validations are not serialized; the
/// last one to finish decides the state.
pub struct SessionManager {
    api: Arc<dyn DashboardApi>,
    tokens: TokenService,
    credentials: Arc<dyn CredentialSource>,
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        tokens: TokenService,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::Unknown);
        Self {
            api,
            tokens,
            credentials,
            state,
        }
    }

    /// Session validated with the bearer token from `tokens`.
    pub fn bearer(api: Arc<dyn DashboardApi>, tokens: TokenService) -> Self {
        let credentials = Arc::new(BearerToken::new(tokens.clone()));
        Self::new(api, tokens, credentials)
    }

    /// Session validated with the legacy cookie session.
    pub fn cookie(api: Arc<dyn DashboardApi>, tokens: TokenService) -> Self {
        Self::new(api, tokens, Arc::new(CookieSession))
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn credentials(&self) -> &dyn CredentialSource {
        self.credentials.as_ref()
    }

    /// Initial check on page load.
    #[instrument(skip(self), fields(credentials = %self.credentials.kind()))]
    pub async fn initialize(&self) -> SessionState {
        info!("Running initial auth check");
        self.validate().await
    }

    /// Check run on each client-side navigation.
    ///
    /// An authenticated session is trusted for the rest of the page load.
    #[instrument(skip(self), fields(credentials = %self.credentials.kind()))]
    pub async fn on_navigate(&self, path: &str) -> SessionState {
        let current = self.state();
        if current.is_authenticated() == Some(true) {
            debug!("Skipping auth check, already authenticated");
            return current;
        }
        debug!("Running auth check for navigation");
        self.validate().await
    }

    async fn validate(&self) -> SessionState {
        let next = match self.credentials.identify(self.api.as_ref()).await {
            Ok(Some(profile)) => {
                info!(
                    username = profile.username(),
                    owner = profile.is_owner(),
                    "User authenticated"
                );
                SessionState::Authenticated(profile)
            }
            Ok(None) => {
                debug!("No credential held");
                SessionState::Unauthenticated
            }
            Err(e) => {
                info!(error = %e, "Authentication check failed");
                SessionState::Unauthenticated
            }
        };

        self.state.send_replace(next.clone());
        next
    }

    /// Complete the OAuth return leg from the full callback URL.
    ///
    /// Decodes the `token` parameter locally, stores it and returns where to
    /// go next: `/owner` for owners, `/dashboard` otherwise. Nothing is
    /// written when the parameter is missing; a token that fails to decode
    /// leaves no token behind.
    #[instrument(skip_all)]
    pub fn complete_oauth(
        &self,
        callback_url: &Url,
    ) -> std::result::Result<Navigation, CallbackError> {
        let token = callback_url
            .query_pairs()
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
            .ok_or(CallbackError::MissingToken)?;

        let profile = match jwt::decode_profile(&token) {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "Token decode error");
                if let Err(clear_err) = self.tokens.clear() {
                    warn!(error = %clear_err, "Failed to clear token");
                }
                return Err(CallbackError::Failed(e.into()));
            }
        };

        self.tokens
            .set(AuthToken::new(token))
            .map_err(CallbackError::Failed)?;

        let target = if profile.is_owner() {
            Route::Owner
        } else {
            Route::Dashboard
        };

        info!(username = profile.username(), %target, "OAuth callback complete");
        self.state.send_replace(SessionState::Authenticated(profile));

        Ok(Navigation::Push(target))
    }

    /// Sign out and return a hard navigation to `/`.
    ///
    /// The stored token is always cleared. For the cookie flow the backend
    /// logout endpoint is called too. The session is dropped locally even if
    /// either step fails.
    #[instrument(skip(self), fields(credentials = %self.credentials.kind()))]
    pub async fn logout(&self) -> Result<Navigation> {
        if let Err(e) = self.tokens.clear() {
            warn!(error = %e, "Failed to clear token");
        }

        if let Err(e) = self.credentials.revoke(self.api.as_ref()).await {
            warn!(error = %e, "Backend logout failed");
        }

        self.state.send_replace(SessionState::Unauthenticated);
        info!("Logged out");

        Ok(Navigation::Hard(Route::Root))
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("credentials", &self.credentials.kind())
            .field("state", &*self.state.borrow())
            .finish()
    }
}
