/// Member model and database operations
///
/// Members are soft-deleted via the `deleted` flag and excluded from
/// listings; `status` only ever holds ACTIVE or BANNED. Expiry is a plain
/// timestamp — "expired" is derived at read time, never stored.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE members (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     phone VARCHAR(32) NOT NULL UNIQUE,
///     name VARCHAR(128) NOT NULL,
///     password_hash VARCHAR(255) NOT NULL,
///     avatar VARCHAR(512),
///     status member_status NOT NULL DEFAULT 'ACTIVE',
///     expiry_date TIMESTAMPTZ NOT NULL,
///     deleted BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

/// Stored member status; expiry is not a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "member_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum MemberStatus {
    Active,
    Banned,
}

impl MemberStatus {
    /// The other status; used by the ban/unban toggle
    pub fn toggled(&self) -> Self {
        match self {
            MemberStatus::Active => MemberStatus::Banned,
            MemberStatus::Banned => MemberStatus::Active,
        }
    }
}

/// A gym member
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    pub id: Uuid,

    /// Login identifier, unique
    pub phone: String,

    pub name: String,

    /// Argon2id hash, never plaintext
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub avatar: Option<String>,

    pub status: MemberStatus,

    pub expiry_date: DateTime<Utc>,

    /// Soft-delete flag; deleted members vanish from listings
    pub deleted: bool,

    pub created_at: DateTime<Utc>,
}

/// Input for creating a member
#[derive(Debug, Clone)]
pub struct CreateMember {
    pub phone: String,
    pub name: String,
    pub password_hash: String,
    pub expiry_date: DateTime<Utc>,
}

const COLUMNS: &str =
    "id, phone, name, password_hash, avatar, status, expiry_date, deleted, created_at";

impl Member {
    /// Inserts a new ACTIVE member
    pub async fn create(
        db: impl PgExecutor<'_>,
        data: CreateMember,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Member>(&format!(
            r#"
            INSERT INTO members (phone, name, password_hash, expiry_date)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(data.phone)
        .bind(data.name)
        .bind(data.password_hash)
        .bind(data.expiry_date)
        .fetch_one(db)
        .await
    }

    pub async fn find_by_id(
        db: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Member>(&format!("SELECT {COLUMNS} FROM members WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn find_by_phone(
        db: impl PgExecutor<'_>,
        phone: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Member>(&format!("SELECT {COLUMNS} FROM members WHERE phone = $1"))
            .bind(phone)
            .fetch_optional(db)
            .await
    }

    /// Lists non-deleted members whose name or phone contains `query`,
    /// newest first. An empty query lists everyone.
    pub async fn search(
        db: impl PgExecutor<'_>,
        query: &str,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let pattern = format!("%{}%", query);
        sqlx::query_as::<_, Member>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM members
            WHERE deleted = FALSE AND (name ILIKE $1 OR phone LIKE $1)
            ORDER BY created_at DESC
            "#
        ))
        .bind(pattern)
        .fetch_all(db)
        .await
    }

    /// Sets the stored status; returns false when the member is missing
    pub async fn set_status(
        db: impl PgExecutor<'_>,
        id: Uuid,
        status: MemberStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE members SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Overwrites the password hash; the old one is irrecoverable
    pub async fn set_password(
        db: impl PgExecutor<'_>,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE members SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Applies a renewal: new expiry plus forced ACTIVE status.
    /// Runs inside the renewal transaction alongside the payment row.
    pub async fn apply_renewal(
        db: impl PgExecutor<'_>,
        id: Uuid,
        new_expiry: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE members SET expiry_date = $2, status = $3 WHERE id = $1")
                .bind(id)
                .bind(new_expiry)
                .bind(MemberStatus::Active)
                .execute(db)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Updates a member's own profile fields
    pub async fn update_profile(
        db: impl PgExecutor<'_>,
        id: Uuid,
        name: &str,
        avatar: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE members SET name = $2, avatar = $3 WHERE id = $1")
            .bind(id)
            .bind(name)
            .bind(avatar)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Members that count as active right now: ACTIVE status, unexpired,
    /// not deleted
    pub async fn count_active(
        db: impl PgExecutor<'_>,
        now: DateTime<Utc>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM members
            WHERE status = $1 AND expiry_date > $2 AND deleted = FALSE
            "#,
        )
        .bind(MemberStatus::Active)
        .bind(now)
        .fetch_one(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_toggle_flips_both_ways() {
        assert_eq!(MemberStatus::Active.toggled(), MemberStatus::Banned);
        assert_eq!(MemberStatus::Banned.toggled(), MemberStatus::Active);
    }

    #[test]
    fn test_status_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&MemberStatus::Active).unwrap(),
            "\"ACTIVE\""
        );
        assert_eq!(
            serde_json::to_string(&MemberStatus::Banned).unwrap(),
            "\"BANNED\""
        );
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let member = Member {
            id: Uuid::new_v4(),
            phone: "13800138000".into(),
            name: "test".into(),
            password_hash: "$argon2id$secret".into(),
            avatar: None,
            status: MemberStatus::Active,
            expiry_date: Utc::now(),
            deleted: false,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&member).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
    }
}
