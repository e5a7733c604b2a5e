//! Repository entry types.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;

/// URL shape accepted for repository links.
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^\s$.?#].[^\s]*$").expect("link pattern is valid")
});

/// A linked repository as stored by the backend.
///
/// These are bookmark-like records, not source-control repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRepositoryEntry")]
pub struct RepositoryEntry {
    /// Backend identifier, when the backend exposes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display title. Unique within the list unless the backend assigns ids.
    pub title: String,

    /// Link to the repository.
    pub link: String,

    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Wire shape of an entry. The backend may name its id `id`, `_id` or both.
#[derive(Deserialize)]
struct RawRepositoryEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    object_id: Option<String>,
    title: String,
    link: String,
    #[serde(default)]
    description: Option<String>,
}

impl From<RawRepositoryEntry> for RepositoryEntry {
    fn from(raw: RawRepositoryEntry) -> Self {
        Self {
            id: raw.id.or(raw.object_id),
            title: raw.title,
            link: raw.link,
            description: raw.description,
        }
    }
}

impl RepositoryEntry {
    /// Returns the key used to address this entry on the backend.
    ///
    /// The backend id when present, otherwise the title.
    pub fn key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.title)
    }
}

/// Request body for `POST /api/repositories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRepository {
    pub link: String,
    pub title: String,
    pub description: Option<String>,
}

impl NewRepository {
    /// Build a new entry, validating the link shape.
    ///
    /// Blank descriptions are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Link`] if `link` is not an http(s) URL.
    pub fn new(
        link: impl Into<String>,
        title: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, InvalidInputError> {
        let link = link.into();
        validate_link(&link)?;

        Ok(Self {
            link,
            title: title.into(),
            description: description.filter(|d| !d.trim().is_empty()),
        })
    }
}

/// Check a repository link against the accepted URL shape.
pub fn validate_link(link: &str) -> Result<(), InvalidInputError> {
    if LINK_PATTERN.is_match(link) {
        Ok(())
    } else {
        Err(InvalidInputError::Link {
            value: link.to_string(),
        })
    }
}
