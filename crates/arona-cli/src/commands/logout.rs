//! Logout command implementation.

use anyhow::{Context, Result};

use crate::output;
use crate::session::CliSession;

pub async fn run(session: &CliSession) -> Result<()> {
    let navigation = session
        .manager
        .logout()
        .await
        .context("Failed to clear stored token")?;

    output::success("Logged out");
    output::hint(&format!("Back to {}", navigation.route()));
    Ok(())
}
