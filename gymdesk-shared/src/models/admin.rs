/// Admin model and database operations
///
/// Admin accounts are managed by other admins and deleted physically.
/// Usernames are letters-only and unique; the SUPER_ADMIN role exists but
/// grants nothing extra in scope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "admin_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminRole {
    SuperAdmin,
    Staff,
}

/// A staff/operator account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Admin {
    pub id: Uuid,

    /// Login identifier, unique, letters only
    pub username: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: AdminRole,

    pub created_at: DateTime<Utc>,
}

/// Input for creating an admin
#[derive(Debug, Clone)]
pub struct CreateAdmin {
    pub username: String,
    pub password_hash: String,
    pub role: AdminRole,
}

const COLUMNS: &str = "id, username, password_hash, role, created_at";

impl Admin {
    pub async fn create(
        db: impl PgExecutor<'_>,
        data: CreateAdmin,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Admin>(&format!(
            r#"
            INSERT INTO admins (username, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(data.username)
        .bind(data.password_hash)
        .bind(data.role)
        .fetch_one(db)
        .await
    }

    pub async fn find_by_id(
        db: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Admin>(&format!("SELECT {COLUMNS} FROM admins WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn find_by_username(
        db: impl PgExecutor<'_>,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Admin>(&format!(
            "SELECT {COLUMNS} FROM admins WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(db)
        .await
    }

    pub async fn list(db: impl PgExecutor<'_>) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Admin>(&format!(
            "SELECT {COLUMNS} FROM admins ORDER BY created_at ASC"
        ))
        .fetch_all(db)
        .await
    }

    /// Updates username and, when given, the password hash
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: Uuid,
        username: &str,
        password_hash: Option<&str>,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Admin>(&format!(
            r#"
            UPDATE admins
            SET username = $2, password_hash = COALESCE($3, password_hash)
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(username)
        .bind(password_hash)
        .fetch_optional(db)
        .await
    }

    /// Physical delete; returns false when the admin is missing
    pub async fn delete(db: impl PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM admins WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(db: impl PgExecutor<'_>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(db)
            .await
    }
}

/// Letters-only username rule for admin accounts
pub fn valid_username(username: &str) -> bool {
    !username.is_empty() && username.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_letters_only() {
        assert!(valid_username("admin"));
        assert!(valid_username("FrontDesk"));
        assert!(!valid_username(""));
        assert!(!valid_username("admin1"));
        assert!(!valid_username("front desk"));
        assert!(!valid_username("管理员"));
    }

    #[test]
    fn test_role_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&AdminRole::SuperAdmin).unwrap(),
            "\"SUPER_ADMIN\""
        );
        assert_eq!(serde_json::to_string(&AdminRole::Staff).unwrap(), "\"STAFF\"");
    }
}
