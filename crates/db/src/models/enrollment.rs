//! Enrollment fact rows, one struct per breakdown table.

use insights_core::types::{Day, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Daily total from `course_enrollment_daily`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseEnrollmentDaily {
    pub course_id: String,
    pub date: Day,
    pub count: i32,
    pub created: Timestamp,
}

/// Per-mode daily row from `course_enrollment_modes`. One row per
/// `(course, date, mode)`; the API pivots these into fixed mode columns.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseEnrollmentModeDaily {
    pub course_id: String,
    pub date: Day,
    pub mode: String,
    pub count: i32,
    pub cumulative_count: i32,
    pub created: Timestamp,
}

/// Per-gender daily row. `gender` is null when the account never reported
/// one; those rows land in the `unknown` output bucket.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseEnrollmentByGender {
    pub course_id: String,
    pub date: Day,
    pub gender: Option<String>,
    pub count: i32,
    pub created: Timestamp,
}

/// Per-education-level daily row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseEnrollmentByEducation {
    pub course_id: String,
    pub date: Day,
    pub education_level: Option<String>,
    pub count: i32,
    pub created: Timestamp,
}

/// Per-birth-year daily row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseEnrollmentByBirthYear {
    pub course_id: String,
    pub date: Day,
    pub birth_year: i32,
    pub count: i32,
    pub created: Timestamp,
}

/// Per-country daily row from `course_enrollment_location`. The bare
/// `country_code` resolves to a full country object at serialization.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseEnrollmentByCountry {
    pub course_id: String,
    pub date: Day,
    pub country_code: Option<String>,
    pub count: i32,
    pub created: Timestamp,
}
