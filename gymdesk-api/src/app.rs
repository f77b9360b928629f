/// Application state, router, and the session-guard middleware
///
/// The guard runs in front of every route: it resolves the session cookie
/// once, asks the route-guard contract what to do with the path, and on
/// `Allow` injects the caller's [`AuthContext`] as a request extension.
/// Handlers still re-check the role themselves; the guard only handles
/// redirects.

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post, put},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use gymdesk_shared::auth::{
    context::AuthContext,
    guard::{route_decision, RouteDecision, LOGIN_PATH},
    session::{verify_token, SESSION_COOKIE},
};
use gymdesk_shared::clock::Clock;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/health", get(routes::health::health))
        .route(LOGIN_PATH, get(routes::auth::login_page))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/logout", post(routes::auth::logout))
        // Admin console
        .route("/admin/dashboard", get(routes::dashboard::admin_dashboard))
        .route(
            "/admin/members",
            get(routes::members::list_members).post(routes::members::register_member),
        )
        .route("/admin/members/:id/renew", post(routes::members::renew_member))
        .route("/admin/members/:id/status", post(routes::members::toggle_status))
        .route(
            "/admin/members/:id/password",
            post(routes::members::reset_password),
        )
        .route("/admin/checkin", post(routes::checkin::perform_check_in))
        .route("/admin/checkin/today", get(routes::checkin::today_check_ins))
        .route(
            "/admin/admins",
            get(routes::admins::list_admins).post(routes::admins::create_admin),
        )
        .route(
            "/admin/admins/:id",
            put(routes::admins::update_admin).delete(routes::admins::delete_admin),
        )
        .route("/admin/password", post(routes::settings::change_password))
        // Member portal
        .route("/member/dashboard", get(routes::dashboard::member_dashboard))
        .route(
            "/member/metrics",
            get(routes::metrics::list_metrics).post(routes::metrics::add_metric),
        )
        .route(
            "/member/workouts",
            get(routes::workouts::list_workouts).post(routes::workouts::add_workout),
        )
        .route("/member/profile", put(routes::settings::update_profile))
        .route("/member/password", post(routes::settings::change_password))
        .layer(middleware::from_fn_with_state(state.clone(), session_guard))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Resolves the session cookie and applies the route-guard decision
///
/// A missing, malformed, or expired token is treated as "not logged in".
pub async fn session_guard(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| verify_token(cookie.value(), state.session_secret(), state.clock.now()));

    match route_decision(request.uri().path(), claims.as_ref()) {
        RouteDecision::Allow => {
            if let Some(claims) = claims {
                request
                    .extensions_mut()
                    .insert(AuthContext::from_claims(&claims));
            }
            next.run(request).await
        }
        RouteDecision::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
        RouteDecision::Redirect(target) => Redirect::to(target).into_response(),
    }
}
