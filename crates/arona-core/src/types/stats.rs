//! Bot telemetry shown on the dashboard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Response of `GET /api/bot-stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotStats {
    #[serde(default)]
    pub command_count: u64,
    pub uptime: Uptime,
    #[serde(default)]
    pub server_count: u64,
    #[serde(default)]
    pub user_count: u64,
    #[serde(default)]
    pub guild_member_count: u64,
}

impl BotStats {
    /// Labeled values in dashboard display order.
    pub fn fields(&self) -> [(&'static str, String); 5] {
        [
            ("Commands", self.command_count.to_string()),
            ("Uptime", self.uptime.to_string()),
            ("Servers", self.server_count.to_string()),
            ("Users", self.user_count.to_string()),
            ("Guild Members", self.guild_member_count.to_string()),
        ]
    }
}

/// Bot uptime: either seconds or a string the backend already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Uptime {
    Seconds(u64),
    Text(String),
}

impl fmt::Display for Uptime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Uptime::Text(text) => f.write_str(text),
            Uptime::Seconds(total) => {
                let days = total / 86_400;
                let hours = (total % 86_400) / 3_600;
                let minutes = (total % 3_600) / 60;
                let seconds = total % 60;
                if days > 0 {
                    write!(f, "{}d {}h {}m {}s", days, hours, minutes, seconds)
                } else if hours > 0 {
                    write!(f, "{}h {}m {}s", hours, minutes, seconds)
                } else if minutes > 0 {
                    write!(f, "{}m {}s", minutes, seconds)
                } else {
                    write!(f, "{}s", seconds)
                }
            }
        }
    }
}
