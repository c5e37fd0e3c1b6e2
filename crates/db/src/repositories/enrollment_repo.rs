//! Repositories for the enrollment breakdown tables.
//!
//! All six tables share the `(course_id, date)` access pattern: rows in a
//! half-open date window, or the latest recorded date's rows when no window
//! is given.

use insights_core::types::Day;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use crate::models::enrollment::{
    CourseEnrollmentByBirthYear, CourseEnrollmentByCountry, CourseEnrollmentByEducation,
    CourseEnrollmentByGender, CourseEnrollmentDaily, CourseEnrollmentModeDaily,
};

/// Fetch rows for a course in `[start, end)`, falling back to the latest
/// recorded date when neither bound is given.
async fn window_rows<T>(
    pool: &PgPool,
    table: &str,
    columns: &str,
    order: &str,
    course_id: &str,
    start: Option<Day>,
    end: Option<Day>,
) -> Result<Vec<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let query = match (start, end) {
        (None, None) => format!(
            "SELECT {columns} FROM {table} \
             WHERE course_id = $1 \
               AND date = (SELECT MAX(date) FROM {table} WHERE course_id = $1) \
             ORDER BY {order}"
        ),
        (Some(_), None) => format!(
            "SELECT {columns} FROM {table} \
             WHERE course_id = $1 AND date >= $2 ORDER BY {order}"
        ),
        (None, Some(_)) => format!(
            "SELECT {columns} FROM {table} \
             WHERE course_id = $1 AND date < $2 ORDER BY {order}"
        ),
        (Some(_), Some(_)) => format!(
            "SELECT {columns} FROM {table} \
             WHERE course_id = $1 AND date >= $2 AND date < $3 ORDER BY {order}"
        ),
    };

    let mut q = sqlx::query_as::<_, T>(&query).bind(course_id);
    if let Some(start) = start {
        q = q.bind(start);
    }
    if let Some(end) = end {
        q = q.bind(end);
    }
    q.fetch_all(pool).await
}

/// Provides query operations for the enrollment fact tables.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Daily enrollment totals.
    pub async fn daily(
        pool: &PgPool,
        course_id: &str,
        start: Option<Day>,
        end: Option<Day>,
    ) -> Result<Vec<CourseEnrollmentDaily>, sqlx::Error> {
        window_rows(
            pool,
            "course_enrollment_daily",
            "course_id, date, count, created",
            "date",
            course_id,
            start,
            end,
        )
        .await
    }

    /// Per-mode rows, one per `(date, mode)`.
    pub async fn modes(
        pool: &PgPool,
        course_id: &str,
        start: Option<Day>,
        end: Option<Day>,
    ) -> Result<Vec<CourseEnrollmentModeDaily>, sqlx::Error> {
        window_rows(
            pool,
            "course_enrollment_modes",
            "course_id, date, mode, count, cumulative_count, created",
            "date, mode",
            course_id,
            start,
            end,
        )
        .await
    }

    /// Per-gender rows; null genders sort first and feed the `unknown`
    /// output bucket.
    pub async fn gender(
        pool: &PgPool,
        course_id: &str,
        start: Option<Day>,
        end: Option<Day>,
    ) -> Result<Vec<CourseEnrollmentByGender>, sqlx::Error> {
        window_rows(
            pool,
            "course_enrollment_gender",
            "course_id, date, gender, count, created",
            "date, gender NULLS FIRST",
            course_id,
            start,
            end,
        )
        .await
    }

    /// Per-education-level rows.
    pub async fn education(
        pool: &PgPool,
        course_id: &str,
        start: Option<Day>,
        end: Option<Day>,
    ) -> Result<Vec<CourseEnrollmentByEducation>, sqlx::Error> {
        window_rows(
            pool,
            "course_enrollment_education",
            "course_id, date, education_level, count, created",
            "date, education_level",
            course_id,
            start,
            end,
        )
        .await
    }

    /// Per-birth-year rows.
    pub async fn birth_year(
        pool: &PgPool,
        course_id: &str,
        start: Option<Day>,
        end: Option<Day>,
    ) -> Result<Vec<CourseEnrollmentByBirthYear>, sqlx::Error> {
        window_rows(
            pool,
            "course_enrollment_birth_year",
            "course_id, date, birth_year, count, created",
            "date, birth_year",
            course_id,
            start,
            end,
        )
        .await
    }

    /// Per-country rows.
    pub async fn location(
        pool: &PgPool,
        course_id: &str,
        start: Option<Day>,
        end: Option<Day>,
    ) -> Result<Vec<CourseEnrollmentByCountry>, sqlx::Error> {
        window_rows(
            pool,
            "course_enrollment_location",
            "course_id, date, country_code, count, created",
            "date, country_code",
            course_id,
            start,
            end,
        )
        .await
    }
}
