//! Repository for problem response and distribution tables.

use sqlx::PgPool;

use crate::models::problems::{
    AnswerDistribution, CourseProblem, CourseProblemAndTags, FirstLastAnswerDistribution,
    GradeDistribution, SequentialOpenDistribution,
};

/// Column list for `answer_distribution` SELECT queries.
const ANSWER_COLUMNS: &str = "\
    course_id, module_id, part_id, correct, count, \
    value_id, answer_value, problem_display_name, question_text, variant, created";

/// Column list for `answer_distribution_first_last` SELECT queries.
const FIRST_LAST_COLUMNS: &str = "\
    course_id, module_id, part_id, correct, first_response_count, last_response_count, \
    value_id, answer_value, problem_display_name, question_text, variant, created";

/// Provides query operations for problem fact tables.
pub struct ProblemsRepo;

impl ProblemsRepo {
    /// Per-module submission summary for a course, aggregated over the
    /// answer distribution. `correct_submissions` sums only buckets marked
    /// correct and is null when a module has none.
    pub async fn course_problems(
        pool: &PgPool,
        course_id: &str,
    ) -> Result<Vec<CourseProblem>, sqlx::Error> {
        sqlx::query_as::<_, CourseProblem>(
            "SELECT module_id, \
                    SUM(count) AS total_submissions, \
                    SUM(count) FILTER (WHERE correct) AS correct_submissions, \
                    STRING_AGG(DISTINCT part_id, ',' ORDER BY part_id) AS part_ids, \
                    MAX(created) AS created \
             FROM answer_distribution \
             WHERE course_id = $1 \
             GROUP BY module_id \
             ORDER BY module_id",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }

    /// Per-module submission summary with the module's tags collapsed into
    /// one `name:value` list. Submission totals repeat on every tag row, so
    /// MAX picks the per-module value rather than summing duplicates.
    pub async fn course_problems_and_tags(
        pool: &PgPool,
        course_id: &str,
    ) -> Result<Vec<CourseProblemAndTags>, sqlx::Error> {
        sqlx::query_as::<_, CourseProblemAndTags>(
            "SELECT module_id, \
                    MAX(total_submissions)::BIGINT AS total_submissions, \
                    MAX(correct_submissions)::BIGINT AS correct_submissions, \
                    STRING_AGG(tag_name || ':' || tag_value, ', ' ORDER BY tag_name, tag_value) AS tags, \
                    MAX(created) AS created \
             FROM problem_tags \
             WHERE course_id = $1 \
             GROUP BY module_id \
             ORDER BY module_id",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }

    /// All answer buckets for one problem module, in insertion order so
    /// variant consolidation sees a stable input.
    pub async fn answer_distribution(
        pool: &PgPool,
        module_id: &str,
    ) -> Result<Vec<AnswerDistribution>, sqlx::Error> {
        let query = format!(
            "SELECT {ANSWER_COLUMNS} FROM answer_distribution \
             WHERE module_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, AnswerDistribution>(&query)
            .bind(module_id)
            .fetch_all(pool)
            .await
    }

    /// First/last response buckets for one problem module.
    pub async fn first_last_distribution(
        pool: &PgPool,
        module_id: &str,
    ) -> Result<Vec<FirstLastAnswerDistribution>, sqlx::Error> {
        let query = format!(
            "SELECT {FIRST_LAST_COLUMNS} FROM answer_distribution_first_last \
             WHERE module_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, FirstLastAnswerDistribution>(&query)
            .bind(module_id)
            .fetch_all(pool)
            .await
    }

    /// Grade buckets for one problem module.
    pub async fn grade_distribution(
        pool: &PgPool,
        module_id: &str,
    ) -> Result<Vec<GradeDistribution>, sqlx::Error> {
        sqlx::query_as::<_, GradeDistribution>(
            "SELECT module_id, course_id, grade, max_grade, count, created \
             FROM grade_distribution \
             WHERE module_id = $1 ORDER BY grade",
        )
        .bind(module_id)
        .fetch_all(pool)
        .await
    }

    /// Open counts for one sequential module.
    pub async fn sequential_open_distribution(
        pool: &PgPool,
        module_id: &str,
    ) -> Result<Vec<SequentialOpenDistribution>, sqlx::Error> {
        sqlx::query_as::<_, SequentialOpenDistribution>(
            "SELECT module_id, course_id, count, created \
             FROM sequential_open_distribution \
             WHERE module_id = $1 ORDER BY id",
        )
        .bind(module_id)
        .fetch_all(pool)
        .await
    }
}
