//! Where the token lives on disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use arona_core::TokenService;
use arona_file::FileTokenStore;

/// Resolve the data directory: `--data-dir`/`ARONA_DATA_DIR` first, then the
/// platform data directory.
pub fn data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }

    let dirs = ProjectDirs::from("", "", "arona").context("Could not determine data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Token service over the file store in `dir`.
pub fn token_service(dir: PathBuf) -> TokenService {
    tracing::debug!(dir = %dir.display(), "Using token storage");
    TokenService::new(FileTokenStore::new(dir))
}
