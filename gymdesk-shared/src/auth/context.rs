/// Caller identity passed explicitly into every operation
///
/// Engine code never reads session state from anywhere ambient: the guard
/// middleware resolves the cookie once per request and hands the resulting
/// [`AuthContext`] down as a parameter. Every privileged operation
/// re-checks the role here; the client-supplied role is never trusted.

use uuid::Uuid;

use super::session::{Role, SessionClaims};

/// Generic authorization failure
///
/// Deliberately carries no detail about which check failed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthzError {
    #[error("no permission")]
    Denied,
}

/// Authenticated caller: user id plus role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthContext {
    pub fn from_claims(claims: &SessionClaims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
        }
    }

    /// Admin-gated operations
    pub fn require_admin(&self) -> Result<(), AuthzError> {
        match self.role {
            Role::Admin | Role::SuperAdmin => Ok(()),
            Role::Member => Err(AuthzError::Denied),
        }
    }

    /// Member-gated operations
    pub fn require_member(&self) -> Result<(), AuthzError> {
        match self.role {
            Role::Member => Ok(()),
            Role::Admin | Role::SuperAdmin => Err(AuthzError::Denied),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn ctx(role: Role) -> AuthContext {
        AuthContext {
            user_id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn test_role_checks() {
        assert!(ctx(Role::Admin).require_admin().is_ok());
        assert!(ctx(Role::SuperAdmin).require_admin().is_ok());
        assert!(ctx(Role::Member).require_admin().is_err());

        assert!(ctx(Role::Member).require_member().is_ok());
        assert!(ctx(Role::Admin).require_member().is_err());
    }

    #[test]
    fn test_denial_message_is_generic() {
        let err = ctx(Role::Member).require_admin().unwrap_err();
        assert_eq!(err.to_string(), "no permission");
    }

    #[test]
    fn test_from_claims() {
        let user_id = Uuid::new_v4();
        let claims = SessionClaims::new(user_id, Role::Member, "13800138000".into(), Utc::now());
        let ctx = AuthContext::from_claims(&claims);
        assert_eq!(ctx.user_id, user_id);
        assert_eq!(ctx.role, Role::Member);
    }
}
