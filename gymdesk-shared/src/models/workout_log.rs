/// Workout log model
///
/// Append-only: every submission is a new row, there is no per-day upsert
/// here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutLog {
    pub id: Uuid,
    pub member_id: Uuid,

    /// Workout-type tag ("running", "lifting", ...)
    pub title: String,

    /// Minutes
    pub duration: i32,

    pub notes: Option<String>,

    pub date: DateTime<Utc>,

    pub deleted: bool,
}

/// Input for appending a workout entry
#[derive(Debug, Clone)]
pub struct CreateWorkoutLog {
    pub member_id: Uuid,
    pub title: String,
    pub duration: i32,
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
}

const COLUMNS: &str = "id, member_id, title, duration, notes, date, deleted";

impl WorkoutLog {
    pub async fn create(
        db: impl PgExecutor<'_>,
        data: CreateWorkoutLog,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, WorkoutLog>(&format!(
            r#"
            INSERT INTO workout_logs (member_id, title, duration, notes, date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(data.member_id)
        .bind(data.title)
        .bind(data.duration)
        .bind(data.notes)
        .bind(data.date)
        .fetch_one(db)
        .await
    }

    /// The member's `limit` most recent live entries, newest first
    pub async fn recent(
        db: impl PgExecutor<'_>,
        member_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, WorkoutLog>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM workout_logs
            WHERE member_id = $1 AND deleted = FALSE
            ORDER BY date DESC
            LIMIT $2
            "#
        ))
        .bind(member_id)
        .bind(limit)
        .fetch_all(db)
        .await
    }
}
