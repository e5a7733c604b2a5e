//! Discord user profile as seen by the dashboard.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Avatar shown when the profile carries none.
pub const DEFAULT_AVATAR_URL: &str = "https://cdn.discordapp.com/embed/avatars/0.png";

/// The signed-in user's profile.
///
/// Comes from the backend (`/api/user`, `/api/validate-token`) or from the
/// payload of the JWT handed over on the OAuth callback. Everything except
/// `is_owner` is display data; `is_owner` is the only authorization signal
/// the route guard consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProfile", rename_all = "camelCase")]
pub struct UserProfile {
    username: String,
    #[serde(rename = "avatar")]
    avatar_url: Option<String>,
    is_owner: bool,
}

/// Wire shape before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProfile {
    username: Option<String>,
    #[serde(default, alias = "avatarUrl")]
    avatar: Option<String>,
    #[serde(default)]
    is_owner: Option<bool>,
}

impl TryFrom<RawProfile> for UserProfile {
    type Error = DecodeError;

    fn try_from(raw: RawProfile) -> Result<Self, Self::Error> {
        let username = raw
            .username
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| DecodeError::Schema {
                what: "user profile",
                reason: "missing username".to_string(),
            })?;

        Ok(Self {
            username,
            avatar_url: raw.avatar.filter(|a| !a.is_empty()),
            is_owner: raw.is_owner.unwrap_or(false),
        })
    }
}

impl UserProfile {
    /// Create a profile directly.
    pub fn new(username: impl Into<String>, avatar_url: Option<String>, is_owner: bool) -> Self {
        Self {
            username: username.into(),
            avatar_url,
            is_owner,
        }
    }

    /// Decode a profile from a JSON value, validating the schema.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DecodeError> {
        serde_json::from_value(value).map_err(|e| DecodeError::Schema {
            what: "user profile",
            reason: e.to_string(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    /// Returns the avatar URL, falling back to Discord's default avatar.
    pub fn avatar_or_default(&self) -> &str {
        self.avatar_url().unwrap_or(DEFAULT_AVATAR_URL)
    }

    pub fn is_owner(&self) -> bool {
        self.is_owner
    }
}
