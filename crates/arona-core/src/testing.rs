//! In-process backend used by unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{ProtocolError, StorageError, TransportError};
use crate::repo::{NewRepository, RepositoryEntry};
use crate::traits::{DashboardApi, TokenStore};
use crate::types::{BotStats, Uptime, UserProfile};
use crate::{AuthToken, Error, Result};

/// How the fake answers identity probes.
#[derive(Debug, Clone)]
pub enum Identity {
    User(UserProfile),
    Status(u16),
    Offline,
}

#[derive(Debug)]
pub struct FakeApi {
    pub identity: Mutex<Identity>,
    pub repositories: Mutex<Vec<RepositoryEntry>>,
    pub fail_list: Mutex<bool>,
    pub calls: AtomicUsize,
    pub logouts: AtomicUsize,
}

impl FakeApi {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity: Mutex::new(identity),
            repositories: Mutex::new(Vec::new()),
            fail_list: Mutex::new(false),
            calls: AtomicUsize::new(0),
            logouts: AtomicUsize::new(0),
        }
    }

    pub fn with_repositories(self, count: usize) -> Self {
        *self.repositories.lock().unwrap() = (1..=count).map(entry).collect();
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn identify(&self) -> Result<UserProfile> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.identity.lock().unwrap().clone() {
            Identity::User(profile) => Ok(profile),
            Identity::Status(status) => Err(ProtocolError::new(status, None, None).into()),
            Identity::Offline => Err(TransportError::Connection {
                message: "connection refused".to_string(),
            }
            .into()),
        }
    }
}

pub fn entry(n: usize) -> RepositoryEntry {
    RepositoryEntry {
        id: None,
        title: format!("Repo {n}"),
        link: format!("https://github.com/arona-bot/repo-{n}"),
        description: None,
    }
}

pub fn owner() -> UserProfile {
    UserProfile::new("arona", None, true)
}

pub fn member() -> UserProfile {
    UserProfile::new("sensei", None, false)
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn current_user(&self) -> Result<UserProfile> {
        self.identify()
    }

    async fn validate_token(&self) -> Result<UserProfile> {
        self.identify()
    }

    async fn logout(&self) -> Result<()> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn bot_stats(&self) -> Result<BotStats> {
        Ok(BotStats {
            command_count: 10,
            uptime: Uptime::Seconds(60),
            server_count: 2,
            user_count: 3,
            guild_member_count: 4,
        })
    }

    async fn list_repositories(&self) -> Result<Vec<RepositoryEntry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_list.lock().unwrap() {
            return Err(Error::Protocol(ProtocolError::new(500, None, None)));
        }
        Ok(self.repositories.lock().unwrap().clone())
    }

    async fn create_repository(&self, new: &NewRepository) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.repositories.lock().unwrap().push(RepositoryEntry {
            id: None,
            title: new.title.clone(),
            link: new.link.clone(),
            description: new.description.clone(),
        });
        Ok(())
    }

    async fn delete_repository(&self, key: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut repositories = self.repositories.lock().unwrap();
        let before = repositories.len();
        repositories.retain(|r| r.key() != key);
        if repositories.len() == before {
            return Err(ProtocolError::new(404, Some("Not found".into()), None).into());
        }
        Ok(())
    }

    fn login_url(&self) -> String {
        "http://localhost:3001/auth/discord".to_string()
    }
}

/// Token store whose every operation fails.
#[derive(Debug)]
pub struct BrokenStore;

impl BrokenStore {
    fn failure() -> Error {
        StorageError::Io {
            path: "storage.json".to_string(),
            message: "permission denied".to_string(),
        }
        .into()
    }
}

impl TokenStore for BrokenStore {
    fn load(&self) -> Result<Option<AuthToken>> {
        Err(Self::failure())
    }

    fn save(&self, _token: &AuthToken) -> Result<()> {
        Err(Self::failure())
    }

    fn remove(&self) -> Result<()> {
        Err(Self::failure())
    }
}
