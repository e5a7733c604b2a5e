//! reqwest-backed implementation of the dashboard API.

use async_trait::async_trait;
use tracing::{debug, instrument};

use arona_core::repo::{NewRepository, RepositoryEntry};
use arona_core::traits::DashboardApi;
use arona_core::types::{BotStats, UserProfile};
use arona_core::{ApiUrl, ClientConfig, Result, TokenService};

use crate::client::HttpClient;

/// Cookie-session identity probe.
const USER: &str = "/api/user";

/// Bearer-token validation.
const VALIDATE_TOKEN: &str = "/api/validate-token";

/// Cookie-session logout.
const LOGOUT: &str = "/auth/logout";

const BOT_STATS: &str = "/api/bot-stats";

const REPOSITORIES: &str = "/api/repositories";

/// Response of `GET /api/validate-token`.
#[derive(Debug, serde::Deserialize)]
struct ValidateTokenResponse {
    user: UserProfile,
}

/// The dashboard backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: HttpClient,
}

impl HttpApi {
    /// Create an API client for `api`, attaching tokens from `tokens`.
    pub fn new(api: ApiUrl, tokens: TokenService) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(api, Some(tokens))?,
        })
    }

    /// Create an API client that never sends a bearer token.
    pub fn anonymous(api: ApiUrl) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(api, None)?,
        })
    }

    /// Create an API client from a [`ClientConfig`].
    pub fn from_config(config: &ClientConfig, tokens: TokenService) -> Result<Self> {
        Self::new(config.api_url.clone(), tokens)
    }

    /// Returns the backend origin.
    pub fn url(&self) -> &ApiUrl {
        self.client.api()
    }

    fn endpoint(&self, path: &str) -> String {
        self.client.api().endpoint(path)
    }
}

#[async_trait]
impl DashboardApi for HttpApi {
    #[instrument(skip(self))]
    async fn current_user(&self) -> Result<UserProfile> {
        self.client.get(&self.endpoint(USER), "user profile").await
    }

    #[instrument(skip(self))]
    async fn validate_token(&self) -> Result<UserProfile> {
        let response: ValidateTokenResponse = self
            .client
            .get(&self.endpoint(VALIDATE_TOKEN), "token validation response")
            .await?;
        Ok(response.user)
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<()> {
        self.client.get_no_response(&self.endpoint(LOGOUT)).await
    }

    #[instrument(skip(self))]
    async fn bot_stats(&self) -> Result<BotStats> {
        self.client.get(&self.endpoint(BOT_STATS), "bot stats").await
    }

    #[instrument(skip(self))]
    async fn list_repositories(&self) -> Result<Vec<RepositoryEntry>> {
        let entries: Vec<RepositoryEntry> = self
            .client
            .get(&self.endpoint(REPOSITORIES), "repository list")
            .await?;
        debug!(count = entries.len(), "Listed repositories");
        Ok(entries)
    }

    #[instrument(skip(self, entry), fields(title = %entry.title))]
    async fn create_repository(&self, entry: &NewRepository) -> Result<()> {
        self.client
            .post_no_response(&self.endpoint(REPOSITORIES), entry)
            .await
    }

    #[instrument(skip(self))]
    async fn delete_repository(&self, key: &str) -> Result<()> {
        let url = self.client.api().endpoint_with_segment(REPOSITORIES, key);
        self.client.delete(url.as_str()).await
    }

    fn login_url(&self) -> String {
        self.client.api().login_url()
    }
}
