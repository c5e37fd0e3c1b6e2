//! Weekly course activity rows.

use insights_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// One `(course, week, activity type)` row from `course_activity`.
///
/// `activity_type` is stored the way the pipeline writes it (upper-case,
/// e.g. `ACTIVE`); renaming for the wire happens at serialization.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseActivityWeekly {
    pub course_id: String,
    pub interval_start: Timestamp,
    pub interval_end: Timestamp,
    pub activity_type: String,
    pub count: i32,
    pub created: Timestamp,
}
