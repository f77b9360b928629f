/// Login and logout
///
/// Login is a tagged outcome: success carries the role's dashboard path
/// for the client to follow, failure carries a specific message. A banned
/// member cannot log in at all; an expired one can (the dashboard shows
/// the expired state).

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use gymdesk_shared::auth::{
    guard::LOGIN_PATH,
    password::verify_password,
    session::{clear_session_cookie, create_token, session_cookie, Role},
};
use gymdesk_shared::models::{
    admin::Admin,
    member::{Member, MemberStatus},
};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::response::ApiResponse;

/// Which credential table to authenticate against
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginKind {
    Admin,
    Member,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub role: Option<LoginKind>,
    /// Admin username or member phone
    pub identifier: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    /// Dashboard path the client should navigate to
    pub redirect: &'static str,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let (Some(kind), Some(identifier), Some(password)) = (req.role, req.identifier, req.password)
    else {
        return Err(ApiError::Validation("all fields are required".to_string()));
    };
    if identifier.is_empty() || password.is_empty() {
        return Err(ApiError::Validation("all fields are required".to_string()));
    }

    let now = state.clock.now();

    let (user_id, role, identifier) = match kind {
        LoginKind::Admin => {
            let admin = Admin::find_by_username(&state.db, &identifier)
                .await?
                .ok_or_else(|| {
                    ApiError::Unauthorized("admin account does not exist".to_string())
                })?;
            if !verify_password(&password, &admin.password_hash)? {
                return Err(ApiError::Unauthorized("incorrect password".to_string()));
            }
            (admin.id, Role::Admin, admin.username)
        }
        LoginKind::Member => {
            let member = Member::find_by_phone(&state.db, &identifier)
                .await?
                .filter(|m| !m.deleted)
                .ok_or_else(|| {
                    ApiError::Unauthorized("phone number is not registered".to_string())
                })?;
            if member.status == MemberStatus::Banned {
                return Err(ApiError::Unauthorized(
                    "this account is banned, contact the front desk".to_string(),
                ));
            }
            if !verify_password(&password, &member.password_hash)? {
                return Err(ApiError::Unauthorized("incorrect password".to_string()));
            }
            (member.id, Role::Member, member.phone)
        }
    };

    let token = create_token(user_id, role, &identifier, state.session_secret(), now)?;
    tracing::info!(%user_id, ?role, "login succeeded");

    Ok((
        jar.add(session_cookie(token)),
        Json(LoginResponse {
            success: true,
            redirect: role.dashboard(),
        }),
    ))
}

/// Clears the session cookie; a no-op when no session exists
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<serde_json::Value>>) {
    (
        jar.add(clear_session_cookie()),
        Json(ApiResponse::data(serde_json::json!({
            "redirect": LOGIN_PATH,
        }))),
    )
}

/// Login-page stub for API-only deployments
pub async fn login_page() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("please sign in via POST /auth/login"))
}
