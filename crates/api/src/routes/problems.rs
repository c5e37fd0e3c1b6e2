//! Route definitions for per-module distributions.

use axum::routing::get;
use axum::Router;

use crate::handlers::problems;
use crate::state::AppState;

/// Distribution routes mounted at `/problems`. The sequential-open route
/// serves section modules rather than problems but shares the prefix; the
/// router requires one parameter name across the overlapping segment.
///
/// ```text
/// GET /{module_id}/answer_distribution/          -> answer_distribution
/// GET /{module_id}/grade_distribution/           -> grade_distribution
/// GET /{module_id}/sequential_open_distribution/ -> sequential_open_distribution
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{module_id}/answer_distribution/",
            get(problems::answer_distribution),
        )
        .route(
            "/{module_id}/grade_distribution/",
            get(problems::grade_distribution),
        )
        .route(
            "/{module_id}/sequential_open_distribution/",
            get(problems::sequential_open_distribution),
        )
}
