//! Route definitions for learner analytics.

use axum::routing::get;
use axum::Router;

use crate::handlers::learners;
use crate::state::AppState;

/// Learner routes. These hang directly off the version root rather than a
/// shared prefix, so this router is merged, not nested.
///
/// ```text
/// GET /learners/                            -> learners (paginated)
/// GET /learners/{username}/                 -> learner
/// GET /course_learner_metadata/{course_id}/ -> course_learner_metadata
/// GET /engagement_timelines/{username}/     -> engagement_timeline
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/learners/", get(learners::learners))
        .route("/learners/{username}/", get(learners::learner))
        .route(
            "/course_learner_metadata/{course_id}/",
            get(learners::course_learner_metadata),
        )
        .route(
            "/engagement_timelines/{username}/",
            get(learners::engagement_timeline),
        )
}
