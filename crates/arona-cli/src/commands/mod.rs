//! Command implementations.

pub mod callback;
pub mod login;
pub mod logout;
pub mod open;
pub mod repos;
pub mod stats;
pub mod whoami;

use anyhow::{Context, Result, bail};

use arona_core::{Route, RouteDecision, UserProfile, View, guard};

use crate::cli::{Cli, Commands};
use crate::session::CliSession;

pub async fn handle(cli: Cli) -> Result<()> {
    let session = CliSession::open(&cli.global)?;

    match cli.command {
        Commands::Login => login::run(&session).await,
        Commands::Callback(args) => callback::run(&session, args).await,
        Commands::Open(args) => open::run(&session, args).await,
        Commands::Whoami => whoami::run(&session).await,
        Commands::Stats => stats::run(&session).await,
        Commands::Repos(cmd) => repos::handle(&session, cmd).await,
        Commands::Logout => logout::run(&session).await,
    }
}

/// Validate the session and pass the guard for `/owner`.
pub async fn require_owner(session: &CliSession) -> Result<UserProfile> {
    let state = session.manager.initialize().await;

    match guard(Route::Owner.path(), &state) {
        RouteDecision::Render(View::Owner) => {
            state.user().cloned().context("Session has no profile")
        }
        RouteDecision::Redirect(Route::Dashboard) => bail!("Owner access required."),
        _ => bail!("Not signed in. Run 'arona login' first."),
    }
}
