/// Session token issue/verify and the session cookie contract
///
/// A session is an HS256-signed token carrying the user id, role, and the
/// login identifier (member phone or admin username). Tokens are valid for
/// exactly seven days from issuance with no sliding renewal, and travel in
/// an http-only, secure, same-site-lax cookie named `session` on path `/`.
///
/// Verification fails open: any malformed, tampered, or expired token is
/// indistinguishable from "not logged in" and yields `None`, never an
/// error. Callers must treat a missing context as unauthenticated and
/// re-check the role on every operation.

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cookie name carrying the session token
pub const SESSION_COOKIE: &str = "session";

/// Fixed session validity window
pub const SESSION_TTL_DAYS: i64 = 7;

const ISSUER: &str = "gymdesk";

/// Caller role baked into the session payload
///
/// `super_admin` exists in the payload type but is never issued; treat it
/// as reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Member,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Dashboard path for the role, used by redirects
    pub fn dashboard(&self) -> &'static str {
        match self {
            Role::Member => "/member/dashboard",
            Role::Admin | Role::SuperAdmin => "/admin/dashboard",
        }
    }
}

/// Signed session payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id (member or admin)
    pub sub: Uuid,

    /// Caller role
    pub role: Role,

    /// Member phone or admin username
    pub identifier: String,

    /// Issuer, always "gymdesk"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp), issuance + 7 days
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(user_id: Uuid, role: Role, identifier: String, now: DateTime<Utc>) -> Self {
        Self {
            sub: user_id,
            role,
            identifier,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(SESSION_TTL_DAYS)).timestamp(),
        }
    }
}

/// Error type for token issuance
///
/// Verification has no error type by design; it returns `Option`.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to sign session token: {0}")]
    SignError(String),
}

/// Issues a signed session token for the given identity
pub fn create_token(
    user_id: Uuid,
    role: Role,
    identifier: &str,
    secret: &str,
    now: DateTime<Utc>,
) -> Result<String, SessionError> {
    let claims = SessionClaims::new(user_id, role, identifier.to_string(), now);
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| SessionError::SignError(format!("token encoding failed: {e}")))
}

/// Verifies a session token against the given reference instant, failing
/// open to `None`
///
/// Signature and issuer are checked by the decoder; expiry is checked
/// against `now` so the caller's clock is the only time source. Any
/// failure (including a completely malformed token) is reported as `None`.
pub fn verify_token(token: &str, secret: &str, now: DateTime<Utc>) -> Option<SessionClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    // Expiry is validated below against the injected instant
    validation.validate_exp = false;

    let claims = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .ok()?;

    if now.timestamp() >= claims.exp {
        return None;
    }
    Some(claims)
}

/// Builds the session cookie: http-only, secure, same-site lax, path `/`,
/// 7-day expiry
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::days(SESSION_TTL_DAYS))
        .build()
}

/// Builds an immediately-expiring cookie that clears the session
///
/// Idempotent: clearing an absent session is a no-op at the client.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-session-secret-at-least-32-bytes!!";

    #[test]
    fn test_token_roundtrip() {
        let user_id = Uuid::new_v4();
        let now = Utc::now();
        let token = create_token(user_id, Role::Member, "13800138000", SECRET, now)
            .expect("should sign");

        let claims = verify_token(&token, SECRET, now).expect("should verify");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Member);
        assert_eq!(claims.identifier, "13800138000");
        assert_eq!(claims.iss, "gymdesk");
    }

    #[test]
    fn test_expiry_is_seven_days_from_issuance() {
        let now = Utc::now();
        let claims = SessionClaims::new(Uuid::new_v4(), Role::Admin, "boss".into(), now);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_verify_fails_open_on_garbage() {
        let now = Utc::now();
        assert!(verify_token("", SECRET, now).is_none());
        assert!(verify_token("not.a.token", SECRET, now).is_none());
        assert!(verify_token("a.b.c", SECRET, now).is_none());
    }

    #[test]
    fn test_verify_fails_open_on_wrong_secret() {
        let now = Utc::now();
        let token = create_token(Uuid::new_v4(), Role::Admin, "boss", SECRET, now).unwrap();
        assert!(verify_token(&token, "another-secret-also-32-bytes-long!!!", now).is_none());
    }

    #[test]
    fn test_verify_fails_open_on_expired_token() {
        // Issued 8 days ago, so the 7-day window has passed
        let now = Utc::now();
        let issued = now - Duration::days(8);
        let token = create_token(Uuid::new_v4(), Role::Member, "13800138000", SECRET, issued)
            .unwrap();
        assert!(verify_token(&token, SECRET, now).is_none());
    }

    #[test]
    fn test_verify_expiry_uses_injected_instant_not_ambient_time() {
        // Freshly issued token, judged at different reference instants:
        // only the caller's clock decides expiry.
        let issued = Utc::now();
        let token =
            create_token(Uuid::new_v4(), Role::Member, "13800138000", SECRET, issued).unwrap();

        assert!(verify_token(&token, SECRET, issued).is_some());
        assert!(verify_token(&token, SECRET, issued + Duration::days(6)).is_some());
        // Exactly at exp is no longer valid
        assert!(verify_token(&token, SECRET, issued + Duration::days(7)).is_none());
        assert!(verify_token(&token, SECRET, issued + Duration::days(8)).is_none());
    }

    #[test]
    fn test_verify_fails_open_on_tampered_payload() {
        let now = Utc::now();
        let token =
            create_token(Uuid::new_v4(), Role::Member, "13800138000", SECRET, now).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let tampered_payload = parts[1].replace('a', "b");
        parts[1] = &tampered_payload;
        assert!(verify_token(&parts.join("."), SECRET, now).is_none());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok".to_string());
        assert_eq!(cookie.name(), "session");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie();
        assert_eq!(cookie.name(), "session");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }

    #[test]
    fn test_role_dashboards() {
        assert_eq!(Role::Member.dashboard(), "/member/dashboard");
        assert_eq!(Role::Admin.dashboard(), "/admin/dashboard");
        assert_eq!(Role::SuperAdmin.dashboard(), "/admin/dashboard");
    }
}
