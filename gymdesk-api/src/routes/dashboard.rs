/// Admin and member dashboards
///
/// All "today"/"this week"/"this month" windows come from the injected
/// clock, so they follow the gym's configured timezone rather than the
/// server's.

use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use gymdesk_shared::auth::context::AuthContext;
use gymdesk_shared::bmi::{bmi, BmiBand};
use gymdesk_shared::checkin::{days_of_month, distinct_days, distinct_days_since, weekly_average};
use gymdesk_shared::membership::{days_remaining, display_status};
use gymdesk_shared::models::{
    body_metric::BodyMetric, check_in::CheckIn, member::Member, payment_log::PaymentLog,
};
use serde::Serialize;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::response::ApiResponse;

#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    /// Distinct members who checked in today
    pub today_check_ins: i64,
    /// ACTIVE, unexpired, non-deleted members
    pub active_members: i64,
    /// Payment total since the first of the current month
    pub month_revenue: f64,
}

pub async fn admin_dashboard(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> ApiResult<Json<ApiResponse<AdminDashboard>>> {
    ctx.require_admin()?;

    let now = state.clock.now();
    let today_check_ins =
        CheckIn::distinct_members_between(&state.db, state.clock.day_start(), state.clock.day_end())
            .await?;
    let active_members = Member::count_active(&state.db, now).await?;
    let month_revenue = PaymentLog::revenue_since(&state.db, state.clock.month_start()).await?;

    Ok(Json(ApiResponse::data(AdminDashboard {
        today_check_ins,
        active_members,
        month_revenue,
    })))
}

/// Latest BMI reading, or a label saying why there is none
#[derive(Debug, Serialize)]
pub struct BmiReading {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct MemberDashboard {
    pub name: String,
    pub phone: String,
    pub avatar: Option<String>,
    pub status: &'static str,
    pub expiry_date: DateTime<Utc>,
    /// Clamped at zero for display; the raw value can go negative
    pub days_remaining: i64,
    /// Local day-of-month of each check-in this month, for calendar marks
    pub check_in_days_this_month: Vec<u32>,
    pub total_check_in_days: usize,
    pub check_in_days_this_week: usize,
    /// Distinct check-in days per week since joining, one decimal place
    pub weekly_average: String,
    pub bmi: BmiReading,
}

pub async fn member_dashboard(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> ApiResult<Json<ApiResponse<MemberDashboard>>> {
    ctx.require_member()?;

    let member = Member::find_by_id(&state.db, ctx.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("member not found".to_string()))?;

    let now = state.clock.now();
    let offset = state.clock.offset();
    let remaining = days_remaining(member.expiry_date, now);

    let all_times = CheckIn::times_for_member(&state.db, member.id).await?;
    let month_times = CheckIn::times_for_member_between(
        &state.db,
        member.id,
        state.clock.month_start(),
        state.clock.day_end(),
    )
    .await?;

    let total_days = distinct_days(&all_times, offset);
    let week_days = distinct_days_since(&all_times, offset, state.clock.week_start());
    let average = weekly_average(total_days, member.created_at, now);

    let bmi_reading = match BodyMetric::latest(&state.db, member.id).await? {
        Some(metric) => match metric.height.and_then(|h| bmi(metric.weight, h)) {
            Some(value) => BmiReading {
                value: Some((value * 10.0).round() / 10.0),
                label: BmiBand::classify(value).label().to_string(),
            },
            None => BmiReading {
                value: None,
                label: "missing height".to_string(),
            },
        },
        None => BmiReading {
            value: None,
            label: "not recorded".to_string(),
        },
    };

    Ok(Json(ApiResponse::data(MemberDashboard {
        name: member.name,
        phone: member.phone,
        avatar: member.avatar,
        status: display_status(member.status, remaining),
        expiry_date: member.expiry_date,
        days_remaining: remaining.max(0),
        check_in_days_this_month: days_of_month(&month_times, offset),
        total_check_in_days: total_days,
        check_in_days_this_week: week_days,
        weekly_average: format!("{average:.1}"),
        bmi: bmi_reading,
    })))
}
