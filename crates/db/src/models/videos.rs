//! Video engagement rows.

use insights_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// Summary row for one video module, from `video`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub course_id: String,
    pub pipeline_video_id: String,
    pub encoded_module_id: String,
    pub duration: Option<i32>,
    pub segment_length: i32,
    pub users_at_start: Option<i32>,
    pub users_at_end: Option<i32>,
    pub created: Timestamp,
}

/// One fixed-length segment of a video's view timeline.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoTimeline {
    pub pipeline_video_id: String,
    pub segment: i32,
    pub num_users: i32,
    pub num_views: i32,
    pub created: Timestamp,
}
