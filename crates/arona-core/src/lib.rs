//! arona-core - Types, traits and session logic for the Arona dashboard client.

pub mod auth;
pub mod config;
pub mod error;
pub mod repo;
pub mod routes;
pub mod store;
pub mod token;
pub mod traits;
pub mod types;

#[cfg(test)]
mod testing;

pub use auth::{
    CallbackError, CredentialKind, CredentialSource, Navigation, SessionManager, SessionState,
};
pub use config::{API_URL_ENV, ClientConfig, DEFAULT_API_URL};
pub use error::Error;
pub use repo::{ListState, NewRepository, PageItem, Pagination, RepositoryEntry, RepositoryList};
pub use routes::{Route, RouteDecision, View, guard, resolve};
pub use store::{MemoryTokenStore, TokenService};
pub use token::{AuthToken, TOKEN_KEY};
pub use traits::{DashboardApi, TokenStore};
pub use types::{ApiUrl, BotStats, UserProfile};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
