//! Per-invocation dashboard context.

pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};

use arona_core::repo::{MAX_VISIBLE_PAGES, MAX_VISIBLE_PAGES_NARROW};
use arona_core::{ClientConfig, CredentialKind, DashboardApi, RepositoryList, SessionManager};
use arona_http::HttpApi;

use crate::cli::GlobalArgs;

/// Everything one command needs: the API client and the session manager
/// built over it.
pub struct CliSession {
    pub api: Arc<HttpApi>,
    pub manager: SessionManager,
    max_visible_pages: usize,
}

impl CliSession {
    /// Build the context from the global flags.
    pub fn open(args: &GlobalArgs) -> Result<Self> {
        let mut config = ClientConfig::new(Some(args.api_url.as_str())).context("Invalid API URL")?;
        if args.cookie_session {
            config = config.with_cookie_session();
        }

        let dir = storage::data_dir(args.data_dir.clone())?;
        let tokens = storage::token_service(dir);

        let api = Arc::new(
            HttpApi::from_config(&config, tokens.clone()).context("Failed to build HTTP client")?,
        );

        let manager = match config.credentials {
            CredentialKind::BearerToken => SessionManager::bearer(api.clone(), tokens),
            CredentialKind::CookieSession => SessionManager::cookie(api.clone(), tokens),
        };

        Ok(Self {
            api,
            manager,
            max_visible_pages: pager_width(args.narrow),
        })
    }

    /// A fresh repository list over the same client.
    pub fn repositories(&self) -> RepositoryList {
        RepositoryList::new(self.api.clone())
    }

    pub fn login_url(&self) -> String {
        self.api.login_url()
    }

    pub fn max_visible_pages(&self) -> usize {
        self.max_visible_pages
    }
}

fn pager_width(narrow: bool) -> usize {
    if narrow {
        MAX_VISIBLE_PAGES_NARROW
    } else {
        MAX_VISIBLE_PAGES
    }
}
