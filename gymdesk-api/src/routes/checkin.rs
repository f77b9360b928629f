/// Front-desk check-in
///
/// Gating happens at the desk: a banned or expired member is rejected and
/// no row is written. An admitted member always gets a row, including
/// same-day repeats; de-duplication is a read-time concern. Rejections are
/// business outcomes, not HTTP errors, so they answer 200 with
/// `success: false` and the member card for the operator.

use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use gymdesk_shared::auth::context::AuthContext;
use gymdesk_shared::membership::days_remaining;
use gymdesk_shared::models::{
    check_in::CheckIn,
    member::{Member, MemberStatus},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiResult;
use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub phone: String,
}

/// Member card shown at the desk after a check-in attempt
#[derive(Debug, Serialize)]
pub struct CheckInMember {
    pub name: String,
    pub days_remaining: i64,
    pub status: &'static str,
    pub avatar: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckInOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<CheckInMember>,
}

pub async fn perform_check_in(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(req): Json<CheckInRequest>,
) -> ApiResult<Json<CheckInOutcome>> {
    ctx.require_admin()?;

    let now = state.clock.now();

    let Some(member) = Member::find_by_phone(&state.db, &req.phone)
        .await?
        .filter(|m| !m.deleted)
    else {
        return Ok(Json(CheckInOutcome {
            success: false,
            message: "no member with this phone number".to_string(),
            member: None,
        }));
    };

    let remaining = days_remaining(member.expiry_date, now);

    if member.status == MemberStatus::Banned {
        return Ok(Json(CheckInOutcome {
            success: false,
            message: "this member is banned".to_string(),
            member: Some(CheckInMember {
                name: member.name,
                days_remaining: 0,
                status: "BANNED",
                avatar: member.avatar,
            }),
        }));
    }

    if remaining < 0 {
        return Ok(Json(CheckInOutcome {
            success: false,
            message: format!("membership expired {} days ago", -remaining),
            member: Some(CheckInMember {
                name: member.name,
                days_remaining: remaining,
                status: "EXPIRED",
                avatar: member.avatar,
            }),
        }));
    }

    CheckIn::create(&state.db, member.id, now).await?;
    tracing::info!(member_id = %member.id, "member checked in");

    Ok(Json(CheckInOutcome {
        success: true,
        message: format!("welcome, {}", member.name),
        member: Some(CheckInMember {
            name: member.name,
            days_remaining: remaining,
            status: "ACTIVE",
            avatar: member.avatar,
        }),
    }))
}

/// One check-in row in the today listing
#[derive(Debug, Serialize)]
pub struct TodayCheckIn {
    pub id: Uuid,
    pub member_id: Uuid,
    pub member_name: String,
    pub check_time: DateTime<Utc>,
    pub days_remaining: i64,
}

/// Today's check-ins, newest first, with days-remaining recomputed per row
pub async fn today_check_ins(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> ApiResult<Json<ApiResponse<Vec<TodayCheckIn>>>> {
    ctx.require_admin()?;

    let now = state.clock.now();
    let rows = CheckIn::list_since_with_members(&state.db, state.clock.day_start()).await?;
    let rows = rows
        .into_iter()
        .map(|r| TodayCheckIn {
            id: r.id,
            member_id: r.member_id,
            member_name: r.member_name,
            check_time: r.check_time,
            days_remaining: days_remaining(r.expiry_date, now),
        })
        .collect();

    Ok(Json(ApiResponse::data(rows)))
}
