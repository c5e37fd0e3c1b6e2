//! Handlers for `/api/v0/courses/{course_id}/...`.
//!
//! Every handler validates the course id before touching the database, and
//! an empty result set is a 404 rather than an empty array. Course ids in
//! the legacy `org/course/run` form arrive percent-encoded in the path.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDateTime;
use serde::Deserialize;

use insights_core::course_key::validate_course_id;
use insights_core::formats::DateFormats;
use insights_core::types::Day;
use insights_db::repositories::{ActivityRepo, EnrollmentRepo, ProblemsRepo, VideoRepo};

use crate::error::{ApiError, ApiResult};
use crate::serializers::activity::{self, RecentActivity, WeeklyCourseActivity};
use crate::serializers::enrollment::{
    self, CourseEnrollmentByBirthYear, CourseEnrollmentByCountry, CourseEnrollmentByEducation,
    CourseEnrollmentByGender, CourseEnrollmentDaily, CourseEnrollmentMode,
};
use crate::serializers::problems::{Problem, ProblemAndTags};
use crate::serializers::videos::Video;
use crate::state::AppState;

/// Optional `[start_date, end_date)` window shared by the activity and
/// enrollment endpoints. Values accept the date or datetime format.
#[derive(Debug, Deserialize)]
pub struct DateWindowParams {
    start_date: Option<String>,
    end_date: Option<String>,
}

fn parse_window(
    params: &DateWindowParams,
    formats: &DateFormats,
) -> ApiResult<(Option<NaiveDateTime>, Option<NaiveDateTime>)> {
    let start = params
        .start_date
        .as_deref()
        .map(|raw| formats.parse_date_or_datetime("start_date", raw))
        .transpose()?;
    let end = params
        .end_date
        .as_deref()
        .map(|raw| formats.parse_date_or_datetime("end_date", raw))
        .transpose()?;
    Ok((start, end))
}

fn day_window(
    params: &DateWindowParams,
    formats: &DateFormats,
) -> ApiResult<(Option<Day>, Option<Day>)> {
    let (start, end) = parse_window(params, formats)?;
    Ok((start.map(|at| at.date()), end.map(|at| at.date())))
}

/// 404 instead of an empty list; the distinction between "unknown course"
/// and "course with no data" is not observable in the fact tables.
fn non_empty<T>(rows: Vec<T>) -> ApiResult<Vec<T>> {
    if rows.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Activity
// ---------------------------------------------------------------------------

pub async fn activity(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Query(params): Query<DateWindowParams>,
) -> ApiResult<Json<Vec<WeeklyCourseActivity>>> {
    let course_id = validate_course_id(Some(&course_id))?;
    let formats = &state.config.formats;
    let (start, end) = parse_window(&params, formats)?;

    let rows = ActivityRepo::weekly_activity(
        &state.pool,
        &course_id,
        start.map(|at| at.and_utc()),
        end.map(|at| at.and_utc()),
    )
    .await?;

    Ok(Json(non_empty(activity::pivot_weekly(&rows, formats))?))
}

#[derive(Debug, Deserialize)]
pub struct RecentActivityParams {
    activity_type: Option<String>,
}

pub async fn recent_activity(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Query(params): Query<RecentActivityParams>,
) -> ApiResult<Json<RecentActivity>> {
    let course_id = validate_course_id(Some(&course_id))?;

    let requested = params.activity_type.as_deref().unwrap_or(activity::ANY);
    let stored = activity::stored_activity_type(requested);

    let row = ActivityRepo::most_recent_week(&state.pool, &course_id, &stored)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(RecentActivity::from_row(&row, &state.config.formats)))
}

// ---------------------------------------------------------------------------
// Enrollment
// ---------------------------------------------------------------------------

pub async fn enrollment(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Query(params): Query<DateWindowParams>,
) -> ApiResult<Json<Vec<CourseEnrollmentDaily>>> {
    let course_id = validate_course_id(Some(&course_id))?;
    let formats = &state.config.formats;
    let (start, end) = day_window(&params, formats)?;

    let rows = EnrollmentRepo::daily(&state.pool, &course_id, start, end).await?;
    let presented = rows
        .iter()
        .map(|row| CourseEnrollmentDaily::from_row(row, formats))
        .collect();
    Ok(Json(non_empty(presented)?))
}

pub async fn enrollment_mode(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Query(params): Query<DateWindowParams>,
) -> ApiResult<Json<Vec<CourseEnrollmentMode>>> {
    let course_id = validate_course_id(Some(&course_id))?;
    let formats = &state.config.formats;
    let (start, end) = day_window(&params, formats)?;

    let rows = EnrollmentRepo::modes(&state.pool, &course_id, start, end).await?;
    Ok(Json(non_empty(enrollment::modes_by_day(&rows, formats))?))
}

pub async fn enrollment_gender(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Query(params): Query<DateWindowParams>,
) -> ApiResult<Json<Vec<CourseEnrollmentByGender>>> {
    let course_id = validate_course_id(Some(&course_id))?;
    let formats = &state.config.formats;
    let (start, end) = day_window(&params, formats)?;

    let rows = EnrollmentRepo::gender(&state.pool, &course_id, start, end).await?;
    Ok(Json(non_empty(enrollment::genders_by_day(&rows, formats))?))
}

pub async fn enrollment_education(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Query(params): Query<DateWindowParams>,
) -> ApiResult<Json<Vec<CourseEnrollmentByEducation>>> {
    let course_id = validate_course_id(Some(&course_id))?;
    let formats = &state.config.formats;
    let (start, end) = day_window(&params, formats)?;

    let rows = EnrollmentRepo::education(&state.pool, &course_id, start, end).await?;
    let presented = rows
        .iter()
        .map(|row| CourseEnrollmentByEducation::from_row(row, formats))
        .collect();
    Ok(Json(non_empty(presented)?))
}

pub async fn enrollment_birth_year(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Query(params): Query<DateWindowParams>,
) -> ApiResult<Json<Vec<CourseEnrollmentByBirthYear>>> {
    let course_id = validate_course_id(Some(&course_id))?;
    let formats = &state.config.formats;
    let (start, end) = day_window(&params, formats)?;

    let rows = EnrollmentRepo::birth_year(&state.pool, &course_id, start, end).await?;
    let presented = rows
        .iter()
        .map(|row| CourseEnrollmentByBirthYear::from_row(row, formats))
        .collect();
    Ok(Json(non_empty(presented)?))
}

pub async fn enrollment_location(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Query(params): Query<DateWindowParams>,
) -> ApiResult<Json<Vec<CourseEnrollmentByCountry>>> {
    let course_id = validate_course_id(Some(&course_id))?;
    let formats = &state.config.formats;
    let (start, end) = day_window(&params, formats)?;

    let rows = EnrollmentRepo::location(&state.pool, &course_id, start, end).await?;
    let presented = rows
        .iter()
        .map(|row| CourseEnrollmentByCountry::from_row(row, formats))
        .collect();
    Ok(Json(non_empty(presented)?))
}

// ---------------------------------------------------------------------------
// Problems and videos
// ---------------------------------------------------------------------------

pub async fn problems(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> ApiResult<Json<Vec<Problem>>> {
    let course_id = validate_course_id(Some(&course_id))?;

    let rows = ProblemsRepo::course_problems(&state.pool, &course_id).await?;
    let presented = rows
        .iter()
        .map(|row| Problem::from_row(row, &state.config.formats))
        .collect();
    Ok(Json(non_empty(presented)?))
}

pub async fn problems_and_tags(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> ApiResult<Json<Vec<ProblemAndTags>>> {
    let course_id = validate_course_id(Some(&course_id))?;

    let rows = ProblemsRepo::course_problems_and_tags(&state.pool, &course_id).await?;
    let presented = rows
        .iter()
        .map(|row| ProblemAndTags::from_row(row, &state.config.formats))
        .collect();
    Ok(Json(non_empty(presented)?))
}

pub async fn videos(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> ApiResult<Json<Vec<Video>>> {
    let course_id = validate_course_id(Some(&course_id))?;

    let rows = VideoRepo::course_videos(&state.pool, &course_id).await?;
    let presented = rows
        .iter()
        .map(|row| Video::from_row(row, &state.config.formats))
        .collect();
    Ok(Json(non_empty(presented)?))
}
