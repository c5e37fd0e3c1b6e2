//! Per-learner module engagement rows.

use insights_core::ranges::MetricRangeRow;
use insights_core::types::Day;
use serde::Serialize;
use sqlx::FromRow;

/// Raw `(entity_type, event)` count for one learner-day, from
/// `module_engagement`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ModuleEngagement {
    pub course_id: String,
    pub username: String,
    pub date: Day,
    pub entity_type: String,
    pub entity_id: String,
    pub event: String,
    pub count: i32,
}

/// One day of a learner's timeline, pivoted to metric columns by
/// `EngagementRepo::timeline`. A null column means no events of that kind
/// that day; the serializer renders it as 0.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EngagementDay {
    pub date: Day,
    pub problems_attempted: Option<i64>,
    pub problems_completed: Option<i64>,
    pub discussion_contributions: Option<i64>,
    pub videos_viewed: Option<i64>,
}

/// Cohort range boundary row from `module_engagement_metric_ranges`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ModuleEngagementMetricRange {
    pub course_id: String,
    pub start_date: Day,
    pub end_date: Day,
    pub metric: String,
    pub range_type: String,
    pub low_value: f64,
    pub high_value: f64,
}

impl From<ModuleEngagementMetricRange> for MetricRangeRow {
    fn from(row: ModuleEngagementMetricRange) -> Self {
        MetricRangeRow {
            metric: row.metric,
            range_type: row.range_type,
            low_value: row.low_value,
            high_value: row.high_value,
            start_date: row.start_date,
            end_date: row.end_date,
        }
    }
}
