//! Repository for the per-learner module engagement tables.

use insights_core::engagement_events::{
    ENTITY_DISCUSSION, ENTITY_PROBLEM, ENTITY_VIDEO, EVENT_ATTEMPTED, EVENT_COMPLETED,
    EVENT_CONTRIBUTED, EVENT_VIEWED,
};
use sqlx::PgPool;

use crate::models::engagement::{EngagementDay, ModuleEngagementMetricRange};

/// Provides query operations for learner engagement facts.
pub struct EngagementRepo;

impl EngagementRepo {
    /// One learner's daily engagement timeline: raw `(entity_type, event)`
    /// counts pivoted into metric columns, one row per active day. Pairs
    /// outside the reported vocabulary are dropped by the filters.
    pub async fn timeline(
        pool: &PgPool,
        course_id: &str,
        username: &str,
    ) -> Result<Vec<EngagementDay>, sqlx::Error> {
        let query = format!(
            "SELECT date, \
                    SUM(count) FILTER (WHERE entity_type = '{ENTITY_PROBLEM}' AND event = '{EVENT_ATTEMPTED}') AS problems_attempted, \
                    SUM(count) FILTER (WHERE entity_type = '{ENTITY_PROBLEM}' AND event = '{EVENT_COMPLETED}') AS problems_completed, \
                    SUM(count) FILTER (WHERE entity_type = '{ENTITY_DISCUSSION}' AND event = '{EVENT_CONTRIBUTED}') AS discussion_contributions, \
                    SUM(count) FILTER (WHERE entity_type = '{ENTITY_VIDEO}' AND event = '{EVENT_VIEWED}') AS videos_viewed \
             FROM module_engagement \
             WHERE course_id = $1 AND username = $2 \
             GROUP BY date \
             ORDER BY date"
        );
        sqlx::query_as::<_, EngagementDay>(&query)
            .bind(course_id)
            .bind(username)
            .fetch_all(pool)
            .await
    }

    /// All metric range rows for a course, in insertion order so the shaper's
    /// first-row-wins rule is deterministic.
    pub async fn metric_ranges(
        pool: &PgPool,
        course_id: &str,
    ) -> Result<Vec<ModuleEngagementMetricRange>, sqlx::Error> {
        sqlx::query_as::<_, ModuleEngagementMetricRange>(
            "SELECT course_id, start_date, end_date, metric, range_type, low_value, high_value \
             FROM module_engagement_metric_ranges \
             WHERE course_id = $1 ORDER BY id",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }
}
