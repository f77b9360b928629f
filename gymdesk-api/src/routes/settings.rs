/// Self-service settings: password changes and the member profile
///
/// Password change is shared by both roles; the caller's role decides
/// which credential table is checked and updated.

use axum::{extract::State, Extension, Json};
use gymdesk_shared::auth::context::AuthContext;
use gymdesk_shared::auth::password::{hash_password, verify_password};
use gymdesk_shared::auth::session::Role;
use gymdesk_shared::models::{admin::Admin, member::Member};
use serde::Deserialize;
use validator::Validate;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "current password is required"))]
    pub old_password: String,

    #[validate(length(min = 6, message = "new password must be at least 6 characters"))]
    pub new_password: String,

    pub confirm_password: String,
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Json<ApiResponse<()>>> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    if req.new_password != req.confirm_password {
        return Err(ApiError::Validation("passwords do not match".to_string()));
    }

    match ctx.role {
        Role::Admin | Role::SuperAdmin => {
            let admin = Admin::find_by_id(&state.db, ctx.user_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("account not found".to_string()))?;
            if !verify_password(&req.old_password, &admin.password_hash)? {
                return Err(ApiError::Unauthorized("incorrect password".to_string()));
            }
            let hash = hash_password(&req.new_password)?;
            Admin::update(&state.db, admin.id, &admin.username, Some(&hash)).await?;
        }
        Role::Member => {
            let member = Member::find_by_id(&state.db, ctx.user_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("account not found".to_string()))?;
            if !verify_password(&req.old_password, &member.password_hash)? {
                return Err(ApiError::Unauthorized("incorrect password".to_string()));
            }
            let hash = hash_password(&req.new_password)?;
            Member::set_password(&state.db, member.id, &hash).await?;
        }
    }

    tracing::info!(user_id = %ctx.user_id, "password changed");

    Ok(Json(ApiResponse::message("password changed")))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 128, message = "name must be 1 to 128 characters"))]
    pub name: String,

    pub avatar: Option<String>,
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ApiResponse<()>>> {
    ctx.require_member()?;
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    if !Member::update_profile(&state.db, ctx.user_id, &req.name, req.avatar.as_deref()).await? {
        return Err(ApiError::NotFound("member not found".to_string()));
    }

    Ok(Json(ApiResponse::message("profile updated")))
}
