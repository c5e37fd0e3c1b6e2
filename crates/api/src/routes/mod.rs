pub mod courses;
pub mod learners;
pub mod problems;
pub mod service;
pub mod videos;

use axum::Router;

use crate::error::ApiError;
use crate::state::AppState;

/// Fallback for requests outside the published route table, so unknown
/// paths get the same error body shape as handler failures.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Build the `/api/v0` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /courses/{course_id}/activity/               weekly activity, pivoted per interval
/// /courses/{course_id}/recent_activity/        latest interval for one activity type
/// /courses/{course_id}/enrollment/             daily enrollment totals
/// /courses/{course_id}/enrollment/mode/        per-mode columns per day
/// /courses/{course_id}/enrollment/gender/      per-gender columns per day
/// /courses/{course_id}/enrollment/education/   one row per education level per day
/// /courses/{course_id}/enrollment/birth_year/  one row per birth year per day
/// /courses/{course_id}/enrollment/location/    one row per country per day
/// /courses/{course_id}/problems/               per-problem submission summary
/// /courses/{course_id}/problems_and_tags/      submission summary with tags
/// /courses/{course_id}/videos/                 per-video engagement summary
///
/// /problems/{module_id}/answer_distribution/          consolidated answer buckets
/// /problems/{module_id}/grade_distribution/           grade buckets
/// /problems/{module_id}/sequential_open_distribution/ section open counts
///
/// /videos/{video_id}/timeline/                 per-segment view counts
///
/// /learners/                                   paginated course roster
/// /learners/{username}/                        one learner's roster entry
/// /course_learner_metadata/{course_id}/        roster facets + engagement ranges
/// /engagement_timelines/{username}/            daily engagement timeline
///
/// /authenticated/  /health/  /status/          redirects to the root views
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Per-course analytics.
        .nest("/courses", courses::router())
        // Per-module distributions.
        .nest("/problems", problems::router())
        // Video timelines.
        .nest("/videos", videos::router())
        // Learner routes hang off the version root, not a common prefix.
        .merge(learners::router())
        // Versioned aliases for the service views.
        .merge(service::redirect_router())
}
