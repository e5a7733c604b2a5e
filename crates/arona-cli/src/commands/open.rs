//! Open command: render a route through the guard.

use anyhow::Result;
use tracing::warn;

use arona_core::{DashboardApi, Route, RouteDecision, SessionState, View, resolve};

use crate::cli::OpenArgs;
use crate::commands::callback;
use crate::session::CliSession;
use crate::views;

pub async fn run(session: &CliSession, args: OpenArgs) -> Result<()> {
    let state = session.manager.on_navigate(&args.path).await;
    show(session, &args.path, &state).await
}

/// Resolve `path` against `state` and render where it lands.
pub async fn show(session: &CliSession, path: &str, state: &SessionState) -> Result<()> {
    let resolved = resolve(path, state);

    if let Some(route) = resolved.route
        && Route::parse(path) != Some(route)
    {
        views::redirected(path, route.path());
    }

    if let RouteDecision::Render(View::Callback) = resolved.decision {
        let navigation = callback::complete(session, path)?;
        let state = session.manager.state();
        let landed = resolve(navigation.route().path(), &state);
        return render(session, landed.decision, &state, path).await;
    }

    render(session, resolved.decision, state, path).await
}

async fn render(
    session: &CliSession,
    decision: RouteDecision,
    state: &SessionState,
    path: &str,
) -> Result<()> {
    let view = match decision {
        RouteDecision::Render(view) => view,
        // resolve never hands back a redirect
        RouteDecision::Loading | RouteDecision::Redirect(_) => {
            views::loading();
            return Ok(());
        }
    };

    match (view, state.user()) {
        (View::Login, _) => views::login(&session.login_url()),
        (View::NotFound, _) => views::not_found(path),
        (View::Dashboard, Some(user)) => {
            views::header(user, view);
            match session.api.bot_stats().await {
                Ok(stats) => views::stats(&stats),
                Err(e) => {
                    warn!(error = %e, "Failed to fetch bot stats");
                    views::stats_unavailable();
                }
            }
        }
        (View::Owner, Some(user)) => {
            views::header(user, view);
            let mut list = session.repositories();
            if let Err(e) = list.list().await {
                warn!(error = %e, "Failed to fetch repositories");
            }
            views::repositories(&list, session.max_visible_pages());
        }
        _ => views::loading(),
    }

    Ok(())
}
