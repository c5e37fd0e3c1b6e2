//! Repository for the video engagement tables.

use sqlx::PgPool;

use crate::models::videos::{Video, VideoTimeline};

/// Column list for `video` SELECT queries.
const VIDEO_COLUMNS: &str = "\
    course_id, pipeline_video_id, encoded_module_id, duration, segment_length, \
    users_at_start, users_at_end, created";

/// Provides query operations for video facts.
pub struct VideoRepo;

impl VideoRepo {
    /// All video summary rows for a course.
    pub async fn course_videos(pool: &PgPool, course_id: &str) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {VIDEO_COLUMNS} FROM video \
             WHERE course_id = $1 ORDER BY encoded_module_id"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// The per-segment view timeline for one video.
    pub async fn video_timeline(
        pool: &PgPool,
        video_id: &str,
    ) -> Result<Vec<VideoTimeline>, sqlx::Error> {
        sqlx::query_as::<_, VideoTimeline>(
            "SELECT pipeline_video_id, segment, num_users, num_views, created \
             FROM video_timeline \
             WHERE pipeline_video_id = $1 ORDER BY segment",
        )
        .bind(video_id)
        .fetch_all(pool)
        .await
    }
}
