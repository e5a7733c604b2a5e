//! Backend API trait.

use async_trait::async_trait;

use crate::Result;
use crate::repo::{NewRepository, RepositoryEntry};
use crate::types::{BotStats, UserProfile};

/// The REST surface of the dashboard backend.
///
/// Implementations attach whatever credential they hold to each request and
/// surface non-success responses as [`crate::error::ProtocolError`]. They
/// never retry.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `GET /api/user`: identity of the cookie session.
    async fn current_user(&self) -> Result<UserProfile>;

    /// `GET /api/validate-token`: identity behind the bearer token.
    async fn validate_token(&self) -> Result<UserProfile>;

    /// `GET /auth/logout`: tear down the cookie session.
    async fn logout(&self) -> Result<()>;

    /// `GET /api/bot-stats`.
    async fn bot_stats(&self) -> Result<BotStats>;

    /// `GET /api/repositories`.
    async fn list_repositories(&self) -> Result<Vec<RepositoryEntry>>;

    /// `POST /api/repositories`.
    async fn create_repository(&self, entry: &NewRepository) -> Result<()>;

    /// `DELETE /api/repositories/{key}`.
    async fn delete_repository(&self, key: &str) -> Result<()>;

    /// Browser URL that starts the Discord OAuth flow.
    fn login_url(&self) -> String;
}
