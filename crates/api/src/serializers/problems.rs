//! Problem and answer-distribution presentation.
//!
//! The answer-distribution family has four output shapes: base rows, rows
//! from the first/last-response table, and a "consolidated" variant of each
//! carrying the merge flag the consolidation step supplies. Each shape is
//! its own struct with the full field list so a missing field is a compile
//! error, not a silently thinner response.

use serde::Serialize;

use insights_core::formats::DateFormats;
use insights_core::serialize::value_or_default;
use insights_db::models::problems as rows;

/// Per-problem submission summary for the course problem list.
#[derive(Debug, Serialize)]
pub struct Problem {
    pub module_id: String,
    pub total_submissions: i64,
    pub correct_submissions: i64,
    pub part_ids: Option<String>,
    pub created: Option<String>,
}

impl Problem {
    pub fn from_row(row: &rows::CourseProblem, formats: &DateFormats) -> Self {
        Self {
            module_id: row.module_id.clone(),
            total_submissions: value_or_default(row.total_submissions, 0),
            correct_submissions: value_or_default(row.correct_submissions, 0),
            part_ids: row.part_ids.clone(),
            created: row.created.map(|at| formats.format_datetime(at)),
        }
    }
}

/// Per-problem submission summary joined with its instructor tags.
#[derive(Debug, Serialize)]
pub struct ProblemAndTags {
    pub module_id: String,
    pub total_submissions: i64,
    pub correct_submissions: i64,
    pub tags: Option<String>,
    pub created: Option<String>,
}

impl ProblemAndTags {
    pub fn from_row(row: &rows::CourseProblemAndTags, formats: &DateFormats) -> Self {
        Self {
            module_id: row.module_id.clone(),
            total_submissions: value_or_default(row.total_submissions, 0),
            correct_submissions: value_or_default(row.correct_submissions, 0),
            tags: row.tags.clone(),
            created: row.created.map(|at| formats.format_datetime(at)),
        }
    }
}

// ---------------------------------------------------------------------------
// Answer distributions
// ---------------------------------------------------------------------------

/// One stored answer-distribution row.
#[derive(Debug, Serialize)]
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
    pub created: String,
}

impl AnswerDistribution {
    pub fn from_row(row: &rows::AnswerDistribution, formats: &DateFormats) -> Self {
        Self {
            course_id: row.course_id.clone(),
            module_id: row.module_id.clone(),
            part_id: row.part_id.clone(),
            correct: row.correct,
            count: row.count,
            value_id: row.value_id.clone(),
            answer_value: row.answer_value.clone(),
            problem_display_name: row.problem_display_name.clone(),
            question_text: row.question_text.clone(),
            variant: row.variant,
            created: formats.format_datetime(row.created),
        }
    }
}

/// Base answer distribution plus the consolidation flag. The flag is never
/// derived here; it is whatever the consolidation step decided.
#[derive(Debug, Serialize)]
pub struct ConsolidatedAnswerDistribution {
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
    pub created: String,
    pub consolidated_variant: bool,
}

impl ConsolidatedAnswerDistribution {
    pub fn from_row(
        row: &rows::AnswerDistribution,
        consolidated_variant: bool,
        formats: &DateFormats,
    ) -> Self {
        Self {
            course_id: row.course_id.clone(),
            module_id: row.module_id.clone(),
            part_id: row.part_id.clone(),
            correct: row.correct,
            count: row.count,
            value_id: row.value_id.clone(),
            answer_value: row.answer_value.clone(),
            problem_display_name: row.problem_display_name.clone(),
            question_text: row.question_text.clone(),
            variant: row.variant,
            created: formats.format_datetime(row.created),
            consolidated_variant,
        }
    }
}

/// First/last-response distribution row. Carries per-attempt counts instead
/// of the base `count` field; `count` is excluded by name from this shape.
#[derive(Debug, Serialize)]
pub struct FirstLastAnswerDistribution {
    pub course_id: String,
    pub module_id: String,
    pub part_id: String,
    pub correct: Option<bool>,
    pub value_id: Option<String>,
    pub answer_value: Option<String>,
    pub problem_display_name: Option<String>,
    pub question_text: Option<String>,
    pub variant: Option<i32>,
    pub created: String,
    pub first_response_count: i32,
    pub last_response_count: i32,
}

impl FirstLastAnswerDistribution {
    pub fn from_row(row: &rows::FirstLastAnswerDistribution, formats: &DateFormats) -> Self {
        Self {
            course_id: row.course_id.clone(),
            module_id: row.module_id.clone(),
            part_id: row.part_id.clone(),
            correct: row.correct,
            value_id: row.value_id.clone(),
            answer_value: row.answer_value.clone(),
            problem_display_name: row.problem_display_name.clone(),
            question_text: row.question_text.clone(),
            variant: row.variant,
            created: formats.format_datetime(row.created),
            first_response_count: row.first_response_count,
            last_response_count: row.last_response_count,
        }
    }
}

/// First/last-response distribution plus the consolidation flag.
#[derive(Debug, Serialize)]
pub struct ConsolidatedFirstLastAnswerDistribution {
    pub course_id: String,
    pub module_id: String,
    pub part_id: String,
    pub correct: Option<bool>,
    pub value_id: Option<String>,
    pub answer_value: Option<String>,
    pub problem_display_name: Option<String>,
    pub question_text: Option<String>,
    pub variant: Option<i32>,
    pub created: String,
    pub first_response_count: i32,
    pub last_response_count: i32,
    pub consolidated_variant: bool,
}

impl ConsolidatedFirstLastAnswerDistribution {
    pub fn from_row(
        row: &rows::FirstLastAnswerDistribution,
        consolidated_variant: bool,
        formats: &DateFormats,
    ) -> Self {
        Self {
            course_id: row.course_id.clone(),
            module_id: row.module_id.clone(),
            part_id: row.part_id.clone(),
            correct: row.correct,
            value_id: row.value_id.clone(),
            answer_value: row.answer_value.clone(),
            problem_display_name: row.problem_display_name.clone(),
            question_text: row.question_text.clone(),
            variant: row.variant,
            created: formats.format_datetime(row.created),
            first_response_count: row.first_response_count,
            last_response_count: row.last_response_count,
            consolidated_variant,
        }
    }
}

// ---------------------------------------------------------------------------
// Grade and section-open distributions
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct GradeDistribution {
    pub module_id: String,
    pub course_id: String,
    pub grade: i32,
    pub max_grade: i32,
    pub count: i32,
    pub created: String,
}

impl GradeDistribution {
    pub fn from_row(row: &rows::GradeDistribution, formats: &DateFormats) -> Self {
        Self {
            module_id: row.module_id.clone(),
            course_id: row.course_id.clone(),
            grade: row.grade,
            max_grade: row.max_grade,
            count: row.count,
            created: formats.format_datetime(row.created),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SequentialOpenDistribution {
    pub module_id: String,
    pub course_id: String,
    pub count: i32,
    pub created: String,
}

impl SequentialOpenDistribution {
    pub fn from_row(row: &rows::SequentialOpenDistribution, formats: &DateFormats) -> Self {
        Self {
            module_id: row.module_id.clone(),
            course_id: row.course_id.clone(),
            count: row.count,
            created: formats.format_datetime(row.created),
        }
    }
}
