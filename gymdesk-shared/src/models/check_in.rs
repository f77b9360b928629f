/// Check-in model
///
/// Append-only entry audit. Same-day repeats are written as-is; distinct
/// counts happen only in aggregate queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CheckIn {
    pub id: Uuid,
    pub member_id: Uuid,
    pub check_time: DateTime<Utc>,
}

/// A check-in row joined with the member it belongs to, for the
/// today-at-the-desk listing
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CheckInWithMember {
    pub id: Uuid,
    pub member_id: Uuid,
    pub check_time: DateTime<Utc>,
    pub member_name: String,
    pub expiry_date: DateTime<Utc>,
}

impl CheckIn {
    /// Always inserts; no same-day de-duplication at write time
    pub async fn create(
        db: impl PgExecutor<'_>,
        member_id: Uuid,
        check_time: DateTime<Utc>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, CheckIn>(
            r#"
            INSERT INTO check_ins (member_id, check_time)
            VALUES ($1, $2)
            RETURNING id, member_id, check_time
            "#,
        )
        .bind(member_id)
        .bind(check_time)
        .fetch_one(db)
        .await
    }

    /// Distinct members with at least one check-in inside [start, end)
    pub async fn distinct_members_between(
        db: impl PgExecutor<'_>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT member_id)
            FROM check_ins
            WHERE check_time >= $1 AND check_time < $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(db)
        .await
    }

    /// Check-ins since `start` with member name and expiry, newest first
    pub async fn list_since_with_members(
        db: impl PgExecutor<'_>,
        start: DateTime<Utc>,
    ) -> Result<Vec<CheckInWithMember>, sqlx::Error> {
        sqlx::query_as::<_, CheckInWithMember>(
            r#"
            SELECT c.id, c.member_id, c.check_time,
                   m.name AS member_name, m.expiry_date
            FROM check_ins c
            JOIN members m ON m.id = c.member_id
            WHERE c.check_time >= $1
            ORDER BY c.check_time DESC
            "#,
        )
        .bind(start)
        .fetch_all(db)
        .await
    }

    /// Every check-in timestamp for a member, for day bucketing
    pub async fn times_for_member(
        db: impl PgExecutor<'_>,
        member_id: Uuid,
    ) -> Result<Vec<DateTime<Utc>>, sqlx::Error> {
        sqlx::query_scalar("SELECT check_time FROM check_ins WHERE member_id = $1")
            .bind(member_id)
            .fetch_all(db)
            .await
    }

    /// A member's check-in timestamps inside [start, end)
    pub async fn times_for_member_between(
        db: impl PgExecutor<'_>,
        member_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT check_time FROM check_ins
            WHERE member_id = $1 AND check_time >= $2 AND check_time < $3
            "#,
        )
        .bind(member_id)
        .bind(start)
        .bind(end)
        .fetch_all(db)
        .await
    }
}
