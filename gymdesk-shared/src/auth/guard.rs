/// Route-guard contract
///
/// Pure decision function for the protected path prefixes `/admin` and
/// `/member`, applied by the api crate's middleware:
///
/// - unauthenticated access to a protected prefix redirects to `/login`
/// - an authenticated caller on the other role's prefix is sent to their
///   own dashboard
/// - an authenticated caller visiting `/login` is sent to their dashboard
///
/// A missing or invalid session is the same thing as "not logged in";
/// the guard never distinguishes the two.

use super::session::{Role, SessionClaims};

/// Login page path
pub const LOGIN_PATH: &str = "/login";

/// What the middleware should do with a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Let the request through (injecting the auth context when present)
    Allow,
    /// Redirect to the login page
    RedirectToLogin,
    /// Redirect to the given path
    Redirect(&'static str),
}

/// Decides what to do with a request for `path` under `session`
pub fn route_decision(path: &str, session: Option<&SessionClaims>) -> RouteDecision {
    let protected = path.starts_with("/admin") || path.starts_with("/member");

    let Some(session) = session else {
        if protected {
            return RouteDecision::RedirectToLogin;
        }
        return RouteDecision::Allow;
    };

    if path.starts_with("/admin") && session.role == Role::Member {
        return RouteDecision::Redirect(Role::Member.dashboard());
    }
    if path.starts_with("/member") && session.role != Role::Member {
        return RouteDecision::Redirect(session.role.dashboard());
    }
    if path == LOGIN_PATH {
        return RouteDecision::Redirect(session.role.dashboard());
    }

    RouteDecision::Allow
}
