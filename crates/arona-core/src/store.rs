//! The injected token service and an in-memory store.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::traits::TokenStore;
use crate::{AuthToken, Result};

/// Token store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<AuthToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `token`.
    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<AuthToken>> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &AuthToken) -> Result<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Shared access to the bearer token.
///
/// Every component that needs the token (the HTTP client, the credential
/// source, the OAuth callback) is handed a clone of this service instead of
/// reaching for storage directly. Subscribers are told about every `set` and
/// `clear`.
#[derive(Clone)]
pub struct TokenService {
    inner: Arc<TokenServiceInner>,
}

struct TokenServiceInner {
    store: Box<dyn TokenStore>,
    changes: watch::Sender<Option<AuthToken>>,
}

impl TokenService {
    /// Wrap a durable store. Subscribers start from the token it already holds.
    pub fn new(store: impl TokenStore + 'static) -> Self {
        let (changes, _) = watch::channel(store.load().ok().flatten());
        Self {
            inner: Arc::new(TokenServiceInner {
                store: Box::new(store),
                changes,
            }),
        }
    }

    /// A service over a fresh [`MemoryTokenStore`].
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    /// Read the current token from storage.
    pub fn get(&self) -> Result<Option<AuthToken>> {
        self.inner.store.load()
    }

    /// Persist `token`, overwriting any previous one.
    #[instrument(skip_all)]
    pub fn set(&self, token: AuthToken) -> Result<()> {
        self.inner.store.save(&token)?;
        debug!("Stored auth token");
        self.inner.changes.send_replace(Some(token));
        Ok(())
    }

    /// Remove the token.
    #[instrument(skip_all)]
    pub fn clear(&self) -> Result<()> {
        self.inner.store.remove()?;
        debug!("Cleared auth token");
        self.inner.changes.send_replace(None);
        Ok(())
    }

    /// Subscribe to token changes made through this service.
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthToken>> {
        self.inner.changes.subscribe()
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_previous_token() {
        let tokens = TokenService::in_memory();
        tokens.set(AuthToken::new("first")).unwrap();
        tokens.set(AuthToken::new("second")).unwrap();
        assert_eq!(tokens.get().unwrap(), Some(AuthToken::new("second")));
    }

    #[test]
    fn clear_removes_token() {
        let tokens = TokenService::new(MemoryTokenStore::with_token(AuthToken::new("t")));
        tokens.clear().unwrap();
        assert_eq!(tokens.get().unwrap(), None);
    }

    #[test]
    fn subscribers_start_from_stored_token() {
        let tokens = TokenService::new(MemoryTokenStore::with_token(AuthToken::new("kept")));
        let rx = tokens.subscribe();
        assert_eq!(*rx.borrow(), Some(AuthToken::new("kept")));
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let tokens = TokenService::in_memory();
        let mut rx = tokens.subscribe();

        tokens.set(AuthToken::new("abc")).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Some(AuthToken::new("abc")));

        tokens.clear().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), None);
    }
}
