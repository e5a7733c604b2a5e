//! OAuth callback command implementation.

use anyhow::{Context, Result};
use url::Url;

use arona_core::Navigation;

use crate::cli::CallbackArgs;
use crate::commands::open;
use crate::output;
use crate::session::CliSession;
use crate::views;

/// Origin assumed for bare `/auth-callback?...` paths.
const CALLBACK_ORIGIN: &str = "http://localhost:3000/";

pub async fn run(session: &CliSession, args: CallbackArgs) -> Result<()> {
    let navigation = complete(session, &args.url)?;
    let state = session.manager.state();
    open::show(session, navigation.route().path(), &state).await
}

/// Finish sign-in from a full callback URL or a bare callback path.
///
/// Failures are rendered as the callback error screen before returning.
pub fn complete(session: &CliSession, target: &str) -> Result<Navigation> {
    let url = if target.starts_with('/') {
        Url::parse(CALLBACK_ORIGIN)
            .and_then(|base| base.join(target))
            .context("Invalid callback path")?
    } else {
        Url::parse(target).context("Invalid callback URL")?
    };

    match session.manager.complete_oauth(&url) {
        Ok(navigation) => {
            if let Some(user) = session.manager.state().user() {
                output::success(&format!("Signed in as {}", user.username()));
            }
            Ok(navigation)
        }
        Err(e) => {
            views::callback_error(&e);
            Err(e).context("Sign-in failed")
        }
    }
}
