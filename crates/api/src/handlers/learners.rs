//! Handlers for the learner roster, metadata, and engagement endpoints.
//!
//! Roster-backed endpoints require the search index and answer 503 when it
//! is not configured; the engagement timeline reads only the database and
//! stays up without it. Parameter validation always runs first, so a bad
//! request is a 400 even when the index is down.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::header::HOST;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use insights_core::course_key::validate_course_id;
use insights_core::error::CoreError;
use insights_core::learner::{
    is_sortable_field, DEFAULT_ORDER_BY, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, SORT_ASCENDING,
    SORT_DESCENDING,
};
use insights_core::ranges::{EngagementRanges, MetricRangeRow};
use insights_db::repositories::EngagementRepo;
use insights_search::query::RosterParams;
use insights_search::roster::RosterSearch;

use crate::error::{ApiError, ApiResult};
use crate::pagination::{PageLinks, PaginatedResponse};
use crate::serializers::learners::{
    CourseLearnerMetadata, EngagementDay, EngagementTimeline, Learner,
};
use crate::state::AppState;

fn roster(state: &AppState) -> ApiResult<&dyn RosterSearch> {
    state.roster.as_deref().ok_or(ApiError::SearchUnavailable)
}

fn parameter_error(message: impl Into<String>) -> ApiError {
    CoreError::ParameterValue(message.into()).into()
}

/// Empty query parameters read as absent.
fn supplied(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Comma-split a list-valued parameter; absent or empty means no filter.
fn split_csv(value: Option<&str>) -> Vec<String> {
    supplied(value)
        .map(|value| value.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}

fn present(entry: &insights_search::roster::RosterEntry, state: &AppState) -> Learner {
    Learner::from_entry(
        entry,
        state.config.lms_user_account_base_url.as_deref(),
        &state.config.formats,
    )
}

// ---------------------------------------------------------------------------
// Learner detail
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CourseIdParam {
    course_id: Option<String>,
}

pub async fn learner(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<CourseIdParam>,
) -> ApiResult<Json<Learner>> {
    let course_id = validate_course_id(params.course_id.as_deref())?;
    let store = roster(&state)?;

    let entry = store
        .find_learner(&username, &course_id)
        .await?
        .ok_or(CoreError::LearnerNotFound {
            username,
            course_id,
        })?;

    Ok(Json(present(&entry, &state)))
}

// ---------------------------------------------------------------------------
// Learner list
// ---------------------------------------------------------------------------

/// Raw learner-list query parameters. Numbers stay strings here so a
/// non-numeric `page` is our 400, not a framework rejection.
#[derive(Debug, Default, Deserialize)]
pub struct LearnerListParams {
    course_id: Option<String>,
    segments: Option<String>,
    ignore_segments: Option<String>,
    cohort: Option<String>,
    enrollment_mode: Option<String>,
    text_search: Option<String>,
    order_by: Option<String>,
    sort_order: Option<String>,
    page: Option<String>,
    page_size: Option<String>,
}

fn parse_page(raw: Option<&str>) -> ApiResult<u32> {
    let Some(raw) = supplied(raw) else {
        return Ok(1);
    };
    let value: i64 = raw
        .parse()
        .map_err(|_| parameter_error("Page must be an integer."))?;
    if value < 1 {
        return Err(parameter_error("Page numbers are one-indexed."));
    }
    // An in-range integer that overflows the page type is simply a page
    // past the end of any roster.
    u32::try_from(value).map_err(|_| ApiError::InvalidPage)
}

fn parse_page_size(raw: Option<&str>) -> ApiResult<u32> {
    let Some(raw) = supplied(raw) else {
        return Ok(DEFAULT_PAGE_SIZE);
    };
    let value: i64 = raw
        .parse()
        .map_err(|_| parameter_error("Page size must be an integer."))?;
    if !(1..=i64::from(MAX_PAGE_SIZE)).contains(&value) {
        return Err(parameter_error(format!(
            "Page size must be in the range [1, {MAX_PAGE_SIZE}]."
        )));
    }
    Ok(value as u32)
}

fn validated_roster_params(params: &LearnerListParams) -> ApiResult<RosterParams> {
    let course_id = validate_course_id(params.course_id.as_deref())?;

    let segments = split_csv(params.segments.as_deref());
    let ignore_segments = split_csv(params.ignore_segments.as_deref());
    if !segments.is_empty() && !ignore_segments.is_empty() {
        return Err(parameter_error(
            "Cannot filter on both segments and ignore_segments.",
        ));
    }

    let order_by = supplied(params.order_by.as_deref()).unwrap_or(DEFAULT_ORDER_BY);
    if !is_sortable_field(order_by) {
        return Err(parameter_error(format!(
            "{order_by} is not a valid order_by value."
        )));
    }

    let sort_order = supplied(params.sort_order.as_deref()).unwrap_or(SORT_ASCENDING);
    if sort_order != SORT_ASCENDING && sort_order != SORT_DESCENDING {
        return Err(parameter_error(format!(
            "{sort_order} is not a valid sort_order value."
        )));
    }

    Ok(RosterParams {
        course_id,
        segments,
        ignore_segments,
        cohort: supplied(params.cohort.as_deref()).map(str::to_string),
        enrollment_mode: supplied(params.enrollment_mode.as_deref()).map(str::to_string),
        text_search: supplied(params.text_search.as_deref()).map(str::to_string),
        order_by: order_by.to_string(),
        sort_order: sort_order.to_string(),
        page: parse_page(params.page.as_deref())?,
        page_size: parse_page_size(params.page_size.as_deref())?,
    })
}

/// Page links echo the parameters the request actually carried, normalized
/// and in a fixed order. Defaulted parameters stay out of the links, the
/// same way `page=1` does.
fn page_links(
    base: String,
    params: &LearnerListParams,
    validated: &RosterParams,
) -> PageLinks {
    let mut links = PageLinks::new(base);
    links.param("course_id", &validated.course_id);
    if !validated.segments.is_empty() {
        links.param("segments", validated.segments.join(","));
    }
    if !validated.ignore_segments.is_empty() {
        links.param("ignore_segments", validated.ignore_segments.join(","));
    }
    if let Some(cohort) = &validated.cohort {
        links.param("cohort", cohort);
    }
    if let Some(mode) = &validated.enrollment_mode {
        links.param("enrollment_mode", mode);
    }
    if let Some(text) = &validated.text_search {
        links.param("text_search", text);
    }
    if supplied(params.order_by.as_deref()).is_some() {
        links.param("order_by", &validated.order_by);
    }
    if supplied(params.sort_order.as_deref()).is_some() {
        links.param("sort_order", &validated.sort_order);
    }
    if supplied(params.page_size.as_deref()).is_some() {
        links.page_size(validated.page_size);
    }
    links
}

pub async fn learners(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Query(params): Query<LearnerListParams>,
) -> ApiResult<Json<PaginatedResponse<Learner>>> {
    let roster_params = validated_roster_params(&params)?;
    let store = roster(&state)?;

    // The page is fetched before the envelope is built: `count` is the
    // index-wide match total the query reports, never the page length.
    let page = store.list_learners(&roster_params).await?;

    let host = headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    let links = page_links(
        format!("http://{host}{}", uri.path()),
        &params,
        &roster_params,
    );

    let results = page
        .entries
        .iter()
        .map(|entry| present(entry, &state))
        .collect();

    Ok(Json(PaginatedResponse::new(
        page.total,
        roster_params.page,
        roster_params.page_size,
        &links,
        results,
    )?))
}

// ---------------------------------------------------------------------------
// Course learner metadata
// ---------------------------------------------------------------------------

pub async fn course_learner_metadata(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> ApiResult<Json<CourseLearnerMetadata>> {
    let course_id = validate_course_id(Some(&course_id))?;
    let store = roster(&state)?;

    let aggregates = store.course_metadata(&course_id).await?;

    let range_rows: Vec<MetricRangeRow> = EngagementRepo::metric_ranges(&state.pool, &course_id)
        .await?
        .into_iter()
        .map(MetricRangeRow::from)
        .collect();
    let ranges = EngagementRanges::from_rows(&range_rows, &state.config.formats);

    Ok(Json(CourseLearnerMetadata::new(aggregates, ranges)))
}

// ---------------------------------------------------------------------------
// Engagement timeline
// ---------------------------------------------------------------------------

pub async fn engagement_timeline(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<CourseIdParam>,
) -> ApiResult<Json<EngagementTimeline>> {
    let course_id = validate_course_id(params.course_id.as_deref())?;

    let rows = EngagementRepo::timeline(&state.pool, &course_id, &username).await?;
    if rows.is_empty() {
        return Err(CoreError::TimelineNotFound {
            username,
            course_id,
        }
        .into());
    }

    let days = rows
        .iter()
        .map(|row| EngagementDay::from_row(row, &state.config.formats))
        .collect();
    Ok(Json(EngagementTimeline { days }))
}
