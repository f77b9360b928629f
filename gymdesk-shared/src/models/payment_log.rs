/// Payment log model
///
/// Append-only: one row per paid sign-up or renewal, written in the same
/// transaction as the member change it pays for. Rows are never updated
/// or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_kind", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentKind {
    Renewal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Cash,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PaymentLog {
    pub id: Uuid,
    pub member_id: Uuid,
    pub amount: f64,
    pub days: i32,
    pub kind: PaymentKind,
    pub method: PaymentMethod,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for appending a payment row
#[derive(Debug, Clone)]
pub struct CreatePaymentLog {
    pub member_id: Uuid,
    pub amount: f64,
    pub days: i32,
    pub kind: PaymentKind,
    pub method: PaymentMethod,
    pub notes: Option<String>,
}

const COLUMNS: &str = "id, member_id, amount, days, kind, method, notes, created_at";

impl PaymentLog {
    pub async fn create(
        db: impl PgExecutor<'_>,
        data: CreatePaymentLog,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, PaymentLog>(&format!(
            r#"
            INSERT INTO payment_logs (member_id, amount, days, kind, method, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(data.member_id)
        .bind(data.amount)
        .bind(data.days)
        .bind(data.kind)
        .bind(data.method)
        .bind(data.notes)
        .fetch_one(db)
        .await
    }

    /// Sum of payment amounts since `since` (no upper bound)
    pub async fn revenue_since(
        db: impl PgExecutor<'_>,
        since: DateTime<Utc>,
    ) -> Result<f64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0) FROM payment_logs WHERE created_at >= $1",
        )
        .bind(since)
        .fetch_one(db)
        .await
    }

    /// A member's payment history, newest first
    pub async fn list_by_member(
        db: impl PgExecutor<'_>,
        member_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, PaymentLog>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM payment_logs
            WHERE member_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(member_id)
        .fetch_all(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_method_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentKind::Renewal).unwrap(),
            "\"RENEWAL\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Cash).unwrap(),
            "\"CASH\""
        );
    }
}
