/// Body metric model
///
/// At most one live record per member per local calendar day. The rule is
/// enforced by upsert at write time: a second submission the same day
/// patches the existing row, touching only the fields it supplies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BodyMetric {
    pub id: Uuid,
    pub member_id: Uuid,
    pub weight: f64,
    pub height: Option<f64>,
    pub waist: Option<f64>,
    pub body_fat: Option<f64>,
    pub record_date: DateTime<Utc>,
    pub deleted: bool,
}

/// Partial update where "field omitted" is expressed by `None`, not by a
/// sentinel value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BodyMetricPatch {
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub waist: Option<f64>,
    pub body_fat: Option<f64>,
}

const COLUMNS: &str = "id, member_id, weight, height, waist, body_fat, record_date, deleted";

impl BodyMetric {
    /// Inserts a fresh record for the day
    pub async fn create(
        db: impl PgExecutor<'_>,
        member_id: Uuid,
        weight: f64,
        height: Option<f64>,
        waist: Option<f64>,
        body_fat: Option<f64>,
        record_date: DateTime<Utc>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, BodyMetric>(&format!(
            r#"
            INSERT INTO body_metrics (member_id, weight, height, waist, body_fat, record_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(member_id)
        .bind(weight)
        .bind(height)
        .bind(waist)
        .bind(body_fat)
        .bind(record_date)
        .fetch_one(db)
        .await
    }

    /// The member's live record inside [start, end), if any
    pub async fn find_live_between(
        db: impl PgExecutor<'_>,
        member_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, BodyMetric>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM body_metrics
            WHERE member_id = $1 AND deleted = FALSE
              AND record_date >= $2 AND record_date < $3
            ORDER BY record_date DESC
            LIMIT 1
            "#
        ))
        .bind(member_id)
        .bind(start)
        .bind(end)
        .fetch_optional(db)
        .await
    }

    /// The member's most recent live record
    pub async fn latest(
        db: impl PgExecutor<'_>,
        member_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, BodyMetric>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM body_metrics
            WHERE member_id = $1 AND deleted = FALSE
            ORDER BY record_date DESC
            LIMIT 1
            "#
        ))
        .bind(member_id)
        .fetch_optional(db)
        .await
    }

    /// Patches only the fields the caller supplied; omitted fields keep
    /// their stored values
    pub async fn apply_patch(
        db: impl PgExecutor<'_>,
        id: Uuid,
        patch: &BodyMetricPatch,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, BodyMetric>(&format!(
            r#"
            UPDATE body_metrics
            SET weight = COALESCE($2, weight),
                height = COALESCE($3, height),
                waist = COALESCE($4, waist),
                body_fat = COALESCE($5, body_fat)
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.weight)
        .bind(patch.height)
        .bind(patch.waist)
        .bind(patch.body_fat)
        .fetch_one(db)
        .await
    }

    /// The `limit` most recent live records, returned oldest first for
    /// charting
    pub async fn recent_ascending(
        db: impl PgExecutor<'_>,
        member_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, BodyMetric>(&format!(
            r#"
            SELECT {COLUMNS} FROM (
                SELECT {COLUMNS}
                FROM body_metrics
                WHERE member_id = $1 AND deleted = FALSE
                ORDER BY record_date DESC
                LIMIT $2
            ) recent
            ORDER BY record_date ASC
            "#
        ))
        .bind(member_id)
        .bind(limit)
        .fetch_all(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_default_supplies_nothing() {
        let patch = BodyMetricPatch::default();
        assert!(patch.weight.is_none());
        assert!(patch.height.is_none());
        assert!(patch.waist.is_none());
        assert!(patch.body_fat.is_none());
    }

    #[test]
    fn test_patch_deserializes_omitted_fields_as_absent() {
        let patch: BodyMetricPatch = serde_json::from_str(r#"{"weight": 70.0}"#).unwrap();
        assert_eq!(patch.weight, Some(70.0));
        assert!(patch.waist.is_none());
    }
}
