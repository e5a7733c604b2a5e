//! Core dashboard types.
//!
//! These types validate backend payloads at construction time, so the rest
//! of the client never sees a half-formed profile or URL.

mod api_url;
mod profile;
mod stats;

pub use api_url::ApiUrl;
pub use profile::{DEFAULT_AVATAR_URL, UserProfile};
pub use stats::{BotStats, Uptime};
