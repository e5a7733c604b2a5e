//! Client routes and the route guard.

use std::fmt;

use crate::auth::SessionState;

/// The routes the dashboard serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`: login screen.
    Root,
    /// `/dashboard`: bot statistics.
    Dashboard,
    /// `/owner`: repository management.
    Owner,
    /// `/auth-callback`: OAuth return leg.
    AuthCallback,
}

impl Route {
    /// Match a path. Query string and fragment are ignored, as is a
    /// trailing slash.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };

        match path {
            "/" => Some(Route::Root),
            "/dashboard" => Some(Route::Dashboard),
            "/owner" => Some(Route::Owner),
            "/auth-callback" => Some(Route::AuthCallback),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Dashboard => "/dashboard",
            Route::Owner => "/owner",
            Route::AuthCallback => "/auth-callback",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A view the front end renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
    Owner,
    Callback,
    NotFound,
}

/// What to do with a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session still unknown; show a placeholder.
    Loading,
    /// Render a view.
    Render(View),
    /// Replace the current location with another route.
    Redirect(Route),
}

/// Decide what to render for `path` given the session.
///
/// Protected views are never rendered unless the session is authenticated,
/// and the owner view never for a profile without the owner flag.
pub fn guard(path: &str, session: &SessionState) -> RouteDecision {
    let Some(route) = Route::parse(path) else {
        return RouteDecision::Render(View::NotFound);
    };

    match (route, session) {
        (Route::AuthCallback, _) => RouteDecision::Render(View::Callback),

        (Route::Root, SessionState::Unknown) => RouteDecision::Loading,
        (Route::Root, SessionState::Authenticated(_)) => RouteDecision::Redirect(Route::Dashboard),
        (Route::Root, SessionState::Unauthenticated) => RouteDecision::Render(View::Login),

        (Route::Dashboard, SessionState::Authenticated(_)) => RouteDecision::Render(View::Dashboard),
        (Route::Dashboard, _) => RouteDecision::Redirect(Route::Root),

        (Route::Owner, SessionState::Authenticated(user)) if user.is_owner() => {
            RouteDecision::Render(View::Owner)
        }
        (Route::Owner, SessionState::Authenticated(_)) => RouteDecision::Redirect(Route::Dashboard),
        (Route::Owner, _) => RouteDecision::Redirect(Route::Root),
    }
}

/// Redirect hops followed before giving up.
const MAX_REDIRECTS: usize = 4;

/// The final outcome of following redirects from a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    /// Route the browser ends up on, if any route matched.
    pub route: Option<Route>,
    /// Final decision; never a redirect.
    pub decision: RouteDecision,
}

/// Follow redirects from `path` until a view or the loading placeholder.
pub fn resolve(path: &str, session: &SessionState) -> Resolved {
    let mut route = Route::parse(path);
    let mut decision = guard(path, session);

    for _ in 0..MAX_REDIRECTS {
        let RouteDecision::Redirect(next) = decision else {
            break;
        };
        route = Some(next);
        decision = guard(next.path(), session);
    }

    if let RouteDecision::Redirect(_) = decision {
        // The table has no cycles; treat a runaway chain as still loading.
        decision = RouteDecision::Loading;
    }

    Resolved { route, decision }
}
