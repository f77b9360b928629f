/// Admin-side member management
///
/// Registration and renewal each write a payment row in the same
/// transaction as the member change. Initial and reset passwords are the
/// local date as eight digits; the plaintext is returned to the operator
/// once and only the hash persists.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Duration, Utc};
use gymdesk_shared::auth::context::AuthContext;
use gymdesk_shared::auth::password::{date_password, hash_password};
use gymdesk_shared::membership::{
    days_remaining, display_status, extend_expiry, RenewalPlan, DEFAULT_SIGNUP_DAYS,
};
use gymdesk_shared::models::{
    member::{CreateMember, Member, MemberStatus},
    payment_log::{CreatePaymentLog, PaymentKind, PaymentLog, PaymentMethod},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::response::ApiResponse;

/// Member row shaped for listings: status and days-remaining are derived
/// against the request's reference instant
#[derive(Debug, Serialize)]
pub struct MemberSummary {
    pub id: Uuid,
    pub phone: String,
    pub name: String,
    pub avatar: Option<String>,
    pub status: &'static str,
    pub days_remaining: i64,
    pub expiry_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl MemberSummary {
    pub fn from_member(member: Member, now: DateTime<Utc>) -> Self {
        let remaining = days_remaining(member.expiry_date, now);
        Self {
            id: member.id,
            phone: member.phone,
            name: member.name,
            avatar: member.avatar,
            status: display_status(member.status, remaining),
            days_remaining: remaining,
            expiry_date: member.expiry_date,
            created_at: member.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MemberQuery {
    /// Substring match on name or phone; empty lists everyone
    #[serde(default)]
    pub q: String,
}

pub async fn list_members(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(query): Query<MemberQuery>,
) -> ApiResult<Json<ApiResponse<Vec<MemberSummary>>>> {
    ctx.require_admin()?;

    let now = state.clock.now();
    let members = Member::search(&state.db, &query.q).await?;
    let rows = members
        .into_iter()
        .map(|m| MemberSummary::from_member(m, now))
        .collect();

    Ok(Json(ApiResponse::data(rows)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterMemberRequest {
    #[validate(length(min = 1, max = 128, message = "name is required"))]
    pub name: String,

    #[validate(length(min = 5, max = 32, message = "phone must be 5 to 32 characters"))]
    pub phone: String,

    /// Initial membership length in days; defaults to one year
    pub days: Option<i64>,

    /// Amount collected at the desk; zero or absent writes no payment row
    pub amount: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct RegisteredMember {
    pub member: MemberSummary,
    /// Shown to the operator once; only the hash is stored
    pub initial_password: String,
}

pub async fn register_member(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(req): Json<RegisterMemberRequest>,
) -> ApiResult<Json<ApiResponse<RegisteredMember>>> {
    ctx.require_admin()?;
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let days = req.days.unwrap_or(DEFAULT_SIGNUP_DAYS);
    if days <= 0 {
        return Err(ApiError::Validation(
            "membership length must be positive".to_string(),
        ));
    }
    let amount = req.amount.unwrap_or(0.0);
    if amount < 0.0 {
        return Err(ApiError::Validation("amount cannot be negative".to_string()));
    }

    if Member::find_by_phone(&state.db, &req.phone).await?.is_some() {
        return Err(ApiError::Conflict("phone number already in use".to_string()));
    }

    let now = state.clock.now();
    let initial_password = date_password(state.clock.today());
    let password_hash = hash_password(&initial_password)?;

    let mut tx = state.db.begin().await?;
    let member = Member::create(
        &mut *tx,
        CreateMember {
            phone: req.phone,
            name: req.name,
            password_hash,
            expiry_date: now + Duration::days(days),
        },
    )
    .await?;
    if amount > 0.0 {
        PaymentLog::create(
            &mut *tx,
            CreatePaymentLog {
                member_id: member.id,
                amount,
                days: days as i32,
                kind: PaymentKind::Renewal,
                method: PaymentMethod::Cash,
                notes: Some("new member sign-up".to_string()),
            },
        )
        .await?;
    }
    tx.commit().await?;

    tracing::info!(member_id = %member.id, "registered member");

    Ok(Json(ApiResponse::data_with_message(
        RegisteredMember {
            member: MemberSummary::from_member(member, now),
            initial_password,
        },
        "member registered",
    )))
}

#[derive(Debug, Deserialize)]
pub struct RenewRequest {
    pub plan: RenewalPlan,
}

#[derive(Debug, Serialize)]
pub struct RenewalOutcome {
    pub expiry_date: DateTime<Utc>,
    pub days_remaining: i64,
}

/// Applies a renewal plan: unexpired memberships stack, expired ones
/// restart from now, and a BANNED member is reinstated
pub async fn renew_member(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<RenewRequest>,
) -> ApiResult<Json<ApiResponse<RenewalOutcome>>> {
    ctx.require_admin()?;

    let member = Member::find_by_id(&state.db, id)
        .await?
        .filter(|m| !m.deleted)
        .ok_or_else(|| ApiError::NotFound("member not found".to_string()))?;

    let now = state.clock.now();
    let new_expiry = extend_expiry(now, member.expiry_date, req.plan.days());

    let mut tx = state.db.begin().await?;
    Member::apply_renewal(&mut *tx, member.id, new_expiry).await?;
    PaymentLog::create(
        &mut *tx,
        CreatePaymentLog {
            member_id: member.id,
            amount: req.plan.price(),
            days: req.plan.days() as i32,
            kind: PaymentKind::Renewal,
            method: PaymentMethod::Cash,
            notes: Some(req.plan.notes().to_string()),
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(member_id = %member.id, plan = ?req.plan, "membership renewed");

    Ok(Json(ApiResponse::data_with_message(
        RenewalOutcome {
            expiry_date: new_expiry,
            days_remaining: days_remaining(new_expiry, now),
        },
        "membership renewed",
    )))
}

#[derive(Debug, Serialize)]
pub struct StatusOutcome {
    pub status: MemberStatus,
}

/// Flips ACTIVE <-> BANNED
pub async fn toggle_status(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<StatusOutcome>>> {
    ctx.require_admin()?;

    let member = Member::find_by_id(&state.db, id)
        .await?
        .filter(|m| !m.deleted)
        .ok_or_else(|| ApiError::NotFound("member not found".to_string()))?;

    let status = member.status.toggled();
    Member::set_status(&state.db, member.id, status).await?;

    Ok(Json(ApiResponse::data(StatusOutcome { status })))
}

#[derive(Debug, Serialize)]
pub struct PasswordReset {
    /// Shown to the operator once; only the hash is stored
    pub new_password: String,
}

/// Resets a member's password to today's date as eight digits
pub async fn reset_password(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<PasswordReset>>> {
    ctx.require_admin()?;

    let member = Member::find_by_id(&state.db, id)
        .await?
        .filter(|m| !m.deleted)
        .ok_or_else(|| ApiError::NotFound("member not found".to_string()))?;

    let new_password = date_password(state.clock.today());
    let hash = hash_password(&new_password)?;
    Member::set_password(&state.db, member.id, &hash).await?;

    Ok(Json(ApiResponse::data_with_message(
        PasswordReset { new_password },
        "password reset",
    )))
}
