//! Filesystem storage for the bearer token.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, instrument, warn};

use arona_core::error::StorageError;
use arona_core::traits::TokenStore;
use arona_core::{AuthToken, Error, Result, TOKEN_KEY};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Name of the key/value file inside the data directory.
const STORAGE_FILE: &str = "storage.json";

/// Name of the advisory lock file.
const LOCK_FILE: &str = "storage.lock";

fn map_io(path: &Path, err: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

/// Durable token store backed by a small JSON key/value file.
///
/// The file plays the part of browser local storage: a flat object of
/// string values, with the token under [`TOKEN_KEY`]. Other keys are
/// preserved on write.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    root: PathBuf,
}

impl FileTokenStore {
    /// Create a store in `root`. The directory is created on first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the key/value file.
    pub fn path(&self) -> PathBuf {
        self.root.join(STORAGE_FILE)
    }

    fn lock(&self) -> Result<File> {
        fs::create_dir_all(&self.root).map_err(|e| map_io(&self.root, e))?;

        let lock_path = self.root.join(LOCK_FILE);
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| map_io(&lock_path, e))?;

        lock_file
            .lock_exclusive()
            .map_err(|e| map_io(&lock_path, e))?;
        Ok(lock_file)
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        let path = self.path();
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(map_io(&path, e).into()),
        };

        if json.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let entries = serde_json::from_str(&json).map_err(|e| StorageError::Corrupt {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(entries)
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let path = self.path();
        let json = serde_json::to_string_pretty(entries).map_err(|e| StorageError::Corrupt {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        fs::write(&path, json).map_err(|e| map_io(&path, e))?;

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&path, perms).map_err(|e| map_io(&path, e))?;
        }

        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let lock_file = self.lock()?;

        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(Error::Storage(StorageError::Corrupt { path, message })) => {
                warn!(%path, %message, "Discarding corrupt token storage");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        f(&mut entries);
        self.write_entries(&entries)?;

        lock_file
            .unlock()
            .map_err(|e| map_io(&self.root.join(LOCK_FILE), e))?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn load(&self) -> Result<Option<AuthToken>> {
        let token = self.read_entries()?.remove(TOKEN_KEY).map(AuthToken::new);
        debug!(found = token.is_some(), "Loaded token");
        Ok(token)
    }

    #[instrument(skip_all, fields(root = %self.root.display()))]
    fn save(&self, token: &AuthToken) -> Result<()> {
        self.update(|entries| {
            entries.insert(TOKEN_KEY.to_string(), token.as_str().to_string());
        })
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn remove(&self) -> Result<()> {
        if !self.path().exists() {
            return Ok(());
        }
        self.update(|entries| {
            entries.remove(TOKEN_KEY);
        })
    }
}
