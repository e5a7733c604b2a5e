//! Bot statistics command implementation.

use anyhow::{Context, Result};

use arona_core::DashboardApi;

use crate::session::CliSession;
use crate::views;

pub async fn run(session: &CliSession) -> Result<()> {
    let stats = session
        .api
        .bot_stats()
        .await
        .context("Failed to fetch bot stats")?;

    views::stats(&stats);
    Ok(())
}
