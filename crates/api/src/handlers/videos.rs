//! Handler for `/api/v0/videos/{video_id}/timeline/`.

use axum::extract::{Path, State};
use axum::Json;

use insights_db::repositories::VideoRepo;

use crate::error::{ApiError, ApiResult};
use crate::serializers::videos::VideoTimeline;
use crate::state::AppState;

pub async fn timeline(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<Json<Vec<VideoTimeline>>> {
    let rows = VideoRepo::video_timeline(&state.pool, &video_id).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound);
    }

    let presented = rows
        .iter()
        .map(|row| VideoTimeline::from_row(row, &state.config.formats))
        .collect();
    Ok(Json(presented))
}
