//! Route definitions for per-course analytics.

use axum::routing::get;
use axum::Router;

use crate::handlers::courses;
use crate::state::AppState;

/// Course routes mounted at `/courses`. Course ids with the legacy
/// `org/course/run` form travel percent-encoded in the path segment.
///
/// ```text
/// GET /{course_id}/activity/               -> activity
/// GET /{course_id}/recent_activity/        -> recent_activity
/// GET /{course_id}/enrollment/             -> enrollment
/// GET /{course_id}/enrollment/mode/        -> enrollment_mode
/// GET /{course_id}/enrollment/gender/      -> enrollment_gender
/// GET /{course_id}/enrollment/education/   -> enrollment_education
/// GET /{course_id}/enrollment/birth_year/  -> enrollment_birth_year
/// GET /{course_id}/enrollment/location/    -> enrollment_location
/// GET /{course_id}/problems/               -> problems
/// GET /{course_id}/problems_and_tags/      -> problems_and_tags
/// GET /{course_id}/videos/                 -> videos
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{course_id}/activity/", get(courses::activity))
        .route("/{course_id}/recent_activity/", get(courses::recent_activity))
        .route("/{course_id}/enrollment/", get(courses::enrollment))
        .route("/{course_id}/enrollment/mode/", get(courses::enrollment_mode))
        .route(
            "/{course_id}/enrollment/gender/",
            get(courses::enrollment_gender),
        )
        .route(
            "/{course_id}/enrollment/education/",
            get(courses::enrollment_education),
        )
        .route(
            "/{course_id}/enrollment/birth_year/",
            get(courses::enrollment_birth_year),
        )
        .route(
            "/{course_id}/enrollment/location/",
            get(courses::enrollment_location),
        )
        .route("/{course_id}/problems/", get(courses::problems))
        .route(
            "/{course_id}/problems_and_tags/",
            get(courses::problems_and_tags),
        )
        .route("/{course_id}/videos/", get(courses::videos))
}
