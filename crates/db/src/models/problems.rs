//! Problem response and distribution rows.

use insights_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// One answer bucket from `answer_distribution`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnswerDistribution {
    pub course_id: String,
    pub module_id: String,
    pub part_id: String,
    pub correct: Option<bool>,
    pub count: i32,
    pub value_id: Option<String>,
    pub answer_value: Option<String>,
    pub problem_display_name: Option<String>,
    pub question_text: Option<String>,
    pub variant: Option<i32>,
    pub created: Timestamp,
}

/// One answer bucket from `answer_distribution_first_last`, which splits the
/// plain count into first- and last-response counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FirstLastAnswerDistribution {
    pub course_id: String,
    pub module_id: String,
    pub part_id: String,
    pub correct: Option<bool>,
    pub first_response_count: i32,
    pub last_response_count: i32,
    pub value_id: Option<String>,
    pub answer_value: Option<String>,
    pub problem_display_name: Option<String>,
    pub question_text: Option<String>,
    pub variant: Option<i32>,
    pub created: Timestamp,
}

/// Per-module aggregate over the answer distribution, produced by
/// `ProblemsRepo::course_problems`. Aggregate columns stay `Option` here;
/// defaults are applied at the serialization boundary.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseProblem {
    pub module_id: String,
    pub total_submissions: Option<i64>,
    pub correct_submissions: Option<i64>,
    pub part_ids: Option<String>,
    pub created: Option<Timestamp>,
}

/// Per-module aggregate over `problem_tags` with the tag pairs collapsed to
/// one `name:value, ...` string.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseProblemAndTags {
    pub module_id: String,
    pub total_submissions: Option<i64>,
    pub correct_submissions: Option<i64>,
    pub tags: Option<String>,
    pub created: Option<Timestamp>,
}

/// One grade bucket from `grade_distribution`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GradeDistribution {
    pub module_id: String,
    pub course_id: String,
    pub grade: i32,
    pub max_grade: i32,
    pub count: i32,
    pub created: Timestamp,
}

/// Open count for one sequential from `sequential_open_distribution`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SequentialOpenDistribution {
    pub module_id: String,
    pub course_id: String,
    pub count: i32,
    pub created: Timestamp,
}
