/// Admin account management
///
/// Any admin can manage admin accounts; usernames are letters-only and
/// unique. Deleting your own account is refused so the console can never
/// lock itself out through the UI.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use gymdesk_shared::auth::context::AuthContext;
use gymdesk_shared::auth::password::hash_password;
use gymdesk_shared::models::admin::{valid_username, Admin, AdminRole, CreateAdmin};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::response::ApiResponse;

const MIN_PASSWORD_LEN: usize = 6;

pub async fn list_admins(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> ApiResult<Json<ApiResponse<Vec<Admin>>>> {
    ctx.require_admin()?;

    let admins = Admin::list(&state.db).await?;
    Ok(Json(ApiResponse::data(admins)))
}

#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    pub username: String,
    pub password: String,
}

/// Creates a STAFF admin; SUPER_ADMIN is only ever seeded at bootstrap
pub async fn create_admin(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(req): Json<CreateAdminRequest>,
) -> ApiResult<Json<ApiResponse<Admin>>> {
    ctx.require_admin()?;

    if !valid_username(&req.username) {
        return Err(ApiError::Validation(
            "username must contain letters only".to_string(),
        ));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(
            "password must be at least 6 characters".to_string(),
        ));
    }
    if Admin::find_by_username(&state.db, &req.username)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("username already in use".to_string()));
    }

    let password_hash = hash_password(&req.password)?;
    let admin = Admin::create(
        &state.db,
        CreateAdmin {
            username: req.username,
            password_hash,
            role: AdminRole::Staff,
        },
    )
    .await?;

    tracing::info!(admin_id = %admin.id, "admin account created");

    Ok(Json(ApiResponse::data_with_message(admin, "admin created")))
}

#[derive(Debug, Deserialize)]
pub struct UpdateAdminRequest {
    pub username: String,
    /// Blank or absent keeps the current password
    pub password: Option<String>,
}

pub async fn update_admin(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAdminRequest>,
) -> ApiResult<Json<ApiResponse<Admin>>> {
    ctx.require_admin()?;

    if !valid_username(&req.username) {
        return Err(ApiError::Validation(
            "username must contain letters only".to_string(),
        ));
    }

    let password_hash = match req.password.as_deref().filter(|p| !p.is_empty()) {
        Some(p) if p.len() < MIN_PASSWORD_LEN => {
            return Err(ApiError::Validation(
                "password must be at least 6 characters".to_string(),
            ))
        }
        Some(p) => Some(hash_password(p)?),
        None => None,
    };

    let admin = Admin::update(&state.db, id, &req.username, password_hash.as_deref())
        .await?
        .ok_or_else(|| ApiError::NotFound("admin not found".to_string()))?;

    Ok(Json(ApiResponse::data_with_message(admin, "admin updated")))
}

pub async fn delete_admin(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<()>>> {
    ctx.require_admin()?;

    if id == ctx.user_id {
        return Err(ApiError::Validation(
            "you cannot delete your own account".to_string(),
        ));
    }
    if !Admin::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("admin not found".to_string()));
    }

    tracing::info!(admin_id = %id, "admin account deleted");

    Ok(Json(ApiResponse::message("admin deleted")))
}
