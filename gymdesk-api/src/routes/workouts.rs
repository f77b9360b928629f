/// Member workout log
///
/// Append-only: several entries per day are fine.

use axum::{extract::State, Extension, Json};
use gymdesk_shared::auth::context::AuthContext;
use gymdesk_shared::models::workout_log::{CreateWorkoutLog, WorkoutLog};
use serde::Deserialize;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::response::ApiResponse;

const LIST_LIMIT: i64 = 50;

pub async fn list_workouts(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> ApiResult<Json<ApiResponse<Vec<WorkoutLog>>>> {
    ctx.require_member()?;

    let rows = WorkoutLog::recent(&state.db, ctx.user_id, LIST_LIMIT).await?;
    Ok(Json(ApiResponse::data(rows)))
}

#[derive(Debug, Deserialize)]
pub struct AddWorkoutRequest {
    /// Workout-type tag; `type` is accepted as an alias
    #[serde(alias = "type")]
    pub title: Option<String>,

    /// Minutes; absent counts as zero
    pub duration: Option<i32>,

    pub notes: Option<String>,
}

pub async fn add_workout(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(req): Json<AddWorkoutRequest>,
) -> ApiResult<Json<ApiResponse<WorkoutLog>>> {
    ctx.require_member()?;

    let title = req
        .title
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Validation("workout type is required".to_string()))?;
    let duration = req.duration.unwrap_or(0);
    if duration < 0 {
        return Err(ApiError::Validation("duration cannot be negative".to_string()));
    }

    let log = WorkoutLog::create(
        &state.db,
        CreateWorkoutLog {
            member_id: ctx.user_id,
            title,
            duration,
            notes: req.notes,
            date: state.clock.now(),
        },
    )
    .await?;

    Ok(Json(ApiResponse::data_with_message(log, "workout logged")))
}
