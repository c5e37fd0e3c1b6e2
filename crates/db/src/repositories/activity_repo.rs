//! Repository for the `course_activity` table.

use insights_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::activity::CourseActivityWeekly;

/// Column list for `course_activity` SELECT queries.
const COLUMNS: &str =
    "course_id, interval_start, interval_end, activity_type, count, created";

/// Provides query operations for weekly course activity.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Latest interval row for one activity type, if any exists.
    pub async fn most_recent_week(
        pool: &PgPool,
        course_id: &str,
        activity_type: &str,
    ) -> Result<Option<CourseActivityWeekly>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM course_activity \
             WHERE course_id = $1 AND UPPER(activity_type) = UPPER($2) \
             ORDER BY interval_end DESC LIMIT 1"
        );
        sqlx::query_as::<_, CourseActivityWeekly>(&query)
            .bind(course_id)
            .bind(activity_type)
            .fetch_optional(pool)
            .await
    }

    /// All activity rows for a course, optionally restricted to intervals
    /// starting in `[start, end)`. Ordered by interval then type so the
    /// per-week pivot sees each interval's rows contiguously.
    pub async fn weekly_activity(
        pool: &PgPool,
        course_id: &str,
        start: Option<Timestamp>,
        end: Option<Timestamp>,
    ) -> Result<Vec<CourseActivityWeekly>, sqlx::Error> {
        let mut conditions = vec!["course_id = $1".to_string()];
        let mut next_param = 2;
        if start.is_some() {
            conditions.push(format!("interval_start >= ${next_param}"));
            next_param += 1;
        }
        if end.is_some() {
            conditions.push(format!("interval_start < ${next_param}"));
        }
        let query = format!(
            "SELECT {COLUMNS} FROM course_activity WHERE {} \
             ORDER BY interval_start, activity_type",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, CourseActivityWeekly>(&query).bind(course_id);
        if let Some(start) = start {
            q = q.bind(start);
        }
        if let Some(end) = end {
            q = q.bind(end);
        }
        q.fetch_all(pool).await
    }
}
