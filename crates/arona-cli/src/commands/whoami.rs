//! Whoami command implementation.

use anyhow::{Context, Result};

use crate::session::CliSession;
use crate::views;

pub async fn run(session: &CliSession) -> Result<()> {
    let state = session.manager.initialize().await;
    let user = state
        .user()
        .context("Not signed in. Run 'arona login' first.")?;

    views::profile(user);
    Ok(())
}
