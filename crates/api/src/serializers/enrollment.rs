//! Enrollment breakdown presentation.
//!
//! Daily, per-mode, demographic, and geographic enrollment counts. The
//! per-mode and per-gender shapes pivot one row per bucket per day into one
//! record per day with fixed columns; every recognized bucket is always
//! present, defaulting to 0 when the day has no row for it.

use serde::Serialize;

use insights_core::country::{self, Country};
use insights_core::formats::DateFormats;
use insights_core::serialize::value_or_default;
use insights_core::{enrollment_modes, genders};
use insights_db::models::enrollment as rows;

/// Total enrollment for one day.
#[derive(Debug, Serialize)]
pub struct CourseEnrollmentDaily {
    pub course_id: String,
    pub date: String,
    pub count: i32,
    pub created: String,
}

impl CourseEnrollmentDaily {
    pub fn from_row(row: &rows::CourseEnrollmentDaily, formats: &DateFormats) -> Self {
        Self {
            course_id: row.course_id.clone(),
            date: formats.format_date(row.date),
            count: row.count,
            created: formats.format_datetime(row.created),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-mode pivot
// ---------------------------------------------------------------------------

/// One day's enrollment split by mode. `count`/`cumulative_count` total
/// every stored row for the day, including modes without a published column.
#[derive(Debug, Serialize)]
pub struct CourseEnrollmentMode {
    pub course_id: String,
    pub date: String,
    pub count: i64,
    pub cumulative_count: i64,
    pub created: String,
    pub audit: i32,
    pub credit: i32,
    pub honor: i32,
    pub professional: i32,
    pub verified: i32,
}

impl CourseEnrollmentMode {
    fn from_day(group: &[&rows::CourseEnrollmentModeDaily], formats: &DateFormats) -> Option<Self> {
        let first = group.first()?;

        let mode_count = |mode: &str| -> i32 {
            value_or_default(
                group.iter().find(|row| row.mode == mode).map(|row| row.count),
                0,
            )
        };

        let mut created = first.created;
        for row in group {
            created = created.max(row.created);
        }

        Some(Self {
            course_id: first.course_id.clone(),
            date: formats.format_date(first.date),
            count: group.iter().map(|row| i64::from(row.count)).sum(),
            cumulative_count: group.iter().map(|row| i64::from(row.cumulative_count)).sum(),
            created: formats.format_datetime(created),
            audit: mode_count(enrollment_modes::AUDIT),
            credit: mode_count(enrollment_modes::CREDIT),
            honor: mode_count(enrollment_modes::HONOR),
            professional: mode_count(enrollment_modes::PROFESSIONAL),
            verified: mode_count(enrollment_modes::VERIFIED),
        })
    }
}

/// Pivot date-ordered per-mode rows into one record per day.
pub fn modes_by_day(
    all_rows: &[rows::CourseEnrollmentModeDaily],
    formats: &DateFormats,
) -> Vec<CourseEnrollmentMode> {
    group_by_date(all_rows, |row| row.date, |group| {
        CourseEnrollmentMode::from_day(group, formats)
    })
}

// ---------------------------------------------------------------------------
// Per-gender pivot
// ---------------------------------------------------------------------------

/// One day's enrollment split by gender. Rows with a null or unrecognized
/// gender count toward `unknown`.
#[derive(Debug, Serialize)]
pub struct CourseEnrollmentByGender {
    pub course_id: String,
    pub date: String,
    pub female: i64,
    pub male: i64,
    pub other: i64,
    pub unknown: i64,
    pub created: String,
}

impl CourseEnrollmentByGender {
    fn from_day(group: &[&rows::CourseEnrollmentByGender], formats: &DateFormats) -> Option<Self> {
        let first = group.first()?;

        let mut female = 0i64;
        let mut male = 0i64;
        let mut other = 0i64;
        let mut unknown = 0i64;
        let mut created = first.created;

        for row in group {
            let count = i64::from(row.count);
            match row.gender.as_deref() {
                Some(g) if g == genders::FEMALE => female += count,
                Some(g) if g == genders::MALE => male += count,
                Some(g) if g == genders::OTHER => other += count,
                _ => unknown += count,
            }
            created = created.max(row.created);
        }

        Some(Self {
            course_id: first.course_id.clone(),
            date: formats.format_date(first.date),
            female,
            male,
            other,
            unknown,
            created: formats.format_datetime(created),
        })
    }
}

/// Pivot date-ordered per-gender rows into one record per day.
pub fn genders_by_day(
    all_rows: &[rows::CourseEnrollmentByGender],
    formats: &DateFormats,
) -> Vec<CourseEnrollmentByGender> {
    group_by_date(all_rows, |row| row.date, |group| {
        CourseEnrollmentByGender::from_day(group, formats)
    })
}

// ---------------------------------------------------------------------------
// Row-per-bucket passthroughs
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CourseEnrollmentByEducation {
    pub course_id: String,
    pub date: String,
    pub education_level: Option<String>,
    pub count: i32,
    pub created: String,
}

impl CourseEnrollmentByEducation {
    pub fn from_row(row: &rows::CourseEnrollmentByEducation, formats: &DateFormats) -> Self {
        Self {
            course_id: row.course_id.clone(),
            date: formats.format_date(row.date),
            education_level: row.education_level.clone(),
            count: row.count,
            created: formats.format_datetime(row.created),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CourseEnrollmentByBirthYear {
    pub course_id: String,
    pub date: String,
    pub birth_year: i32,
    pub count: i32,
    pub created: String,
}

impl CourseEnrollmentByBirthYear {
    pub fn from_row(row: &rows::CourseEnrollmentByBirthYear, formats: &DateFormats) -> Self {
        Self {
            course_id: row.course_id.clone(),
            date: formats.format_date(row.date),
            birth_year: row.birth_year,
            count: row.count,
            created: formats.format_datetime(row.created),
        }
    }
}

/// One day's enrollment for one country, with the stored code resolved to
/// the full country object (unresolvable codes present as `UNKNOWN`).
#[derive(Debug, Serialize)]
pub struct CourseEnrollmentByCountry {
    pub date: String,
    pub course_id: String,
    pub country: Country,
    pub count: i32,
    pub created: String,
}

impl CourseEnrollmentByCountry {
    pub fn from_row(row: &rows::CourseEnrollmentByCountry, formats: &DateFormats) -> Self {
        Self {
            date: formats.format_date(row.date),
            course_id: row.course_id.clone(),
            country: country::for_code(row.country_code.as_deref()),
            count: row.count,
            created: formats.format_datetime(row.created),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared day grouping
// ---------------------------------------------------------------------------

/// Fold a date-ordered row stream into one output per run of equal dates.
fn group_by_date<R, T>(
    all_rows: &[R],
    date_of: impl Fn(&R) -> chrono::NaiveDate,
    mut finish: impl FnMut(&[&R]) -> Option<T>,
) -> Vec<T> {
    let mut out = Vec::new();
    let mut group: Vec<&R> = Vec::new();

    for row in all_rows {
        if let Some(first) = group.first() {
            if date_of(first) != date_of(row) {
                out.extend(finish(&group));
                group.clear();
            }
        }
        group.push(row);
    }
    out.extend(finish(&group));

    out
}
