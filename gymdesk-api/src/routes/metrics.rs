/// Member body metrics
///
/// One live record per member per local day, enforced by upsert: a second
/// submission the same day patches the existing row, touching only the
/// fields it supplies. A fresh record needs a weight; height is backfilled
/// from the most recent record when omitted, since it rarely changes.

use axum::{extract::State, Extension, Json};
use gymdesk_shared::auth::context::AuthContext;
use gymdesk_shared::models::body_metric::{BodyMetric, BodyMetricPatch};

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::response::ApiResponse;

/// How many records the trend chart shows
const CHART_LIMIT: i64 = 30;

/// Recent records, oldest first for charting
pub async fn list_metrics(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> ApiResult<Json<ApiResponse<Vec<BodyMetric>>>> {
    ctx.require_member()?;

    let rows = BodyMetric::recent_ascending(&state.db, ctx.user_id, CHART_LIMIT).await?;
    Ok(Json(ApiResponse::data(rows)))
}

pub async fn add_metric(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(patch): Json<BodyMetricPatch>,
) -> ApiResult<Json<ApiResponse<BodyMetric>>> {
    ctx.require_member()?;

    for (field, value) in [
        ("weight", patch.weight),
        ("height", patch.height),
        ("waist", patch.waist),
        ("body_fat", patch.body_fat),
    ] {
        if value.is_some_and(|v| v <= 0.0) {
            return Err(ApiError::Validation(format!("{field} must be positive")));
        }
    }

    let existing = BodyMetric::find_live_between(
        &state.db,
        ctx.user_id,
        state.clock.day_start(),
        state.clock.day_end(),
    )
    .await?;

    let saved = match existing {
        Some(row) => BodyMetric::apply_patch(&state.db, row.id, &patch).await?,
        None => {
            let Some(weight) = patch.weight else {
                return Err(ApiError::Validation("weight is required".to_string()));
            };
            let height = match patch.height {
                Some(h) => Some(h),
                None => BodyMetric::latest(&state.db, ctx.user_id)
                    .await?
                    .and_then(|m| m.height),
            };
            BodyMetric::create(
                &state.db,
                ctx.user_id,
                weight,
                height,
                patch.waist,
                patch.body_fat,
                state.clock.now(),
            )
            .await?
        }
    };

    Ok(Json(ApiResponse::data_with_message(saved, "record saved")))
}
