//! Login command implementation.

use anyhow::Result;

use arona_core::SessionState;

use crate::output;
use crate::session::CliSession;
use crate::views;

pub async fn run(session: &CliSession) -> Result<()> {
    if let SessionState::Authenticated(user) = session.manager.initialize().await {
        output::success(&format!("Already signed in as {}", user.username()));
        return Ok(());
    }

    views::login(&session.login_url());
    Ok(())
}
