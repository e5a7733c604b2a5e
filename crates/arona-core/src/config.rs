//! Client configuration shared by the HTTP client and the CLI.

use crate::Result;
use crate::auth::CredentialKind;
use crate::types::ApiUrl;

/// Environment variable holding the backend origin.
pub const API_URL_ENV: &str = "ARONA_API_URL";

/// Backend origin used when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// How to reach the backend and which credential to present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: ApiUrl,
    pub credentials: CredentialKind,
}

impl ClientConfig {
    /// Bearer-token config for `api_url`, falling back to
    /// [`DEFAULT_API_URL`] when it is `None` or blank.
    pub fn new(api_url: Option<&str>) -> Result<Self> {
        let api_url = match api_url.map(str::trim) {
            Some(url) if !url.is_empty() => ApiUrl::new(url)?,
            _ => ApiUrl::new(DEFAULT_API_URL)?,
        };

        Ok(Self {
            api_url,
            credentials: CredentialKind::BearerToken,
        })
    }

    /// Switch to the legacy cookie session.
    pub fn with_cookie_session(mut self) -> Self {
        self.credentials = CredentialKind::CookieSession;
        self
    }
}
