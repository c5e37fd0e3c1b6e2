//! Route definitions for video engagement.

use axum::routing::get;
use axum::Router;

use crate::handlers::videos;
use crate::state::AppState;

/// Video routes mounted at `/videos`.
///
/// ```text
/// GET /{video_id}/timeline/ -> timeline
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{video_id}/timeline/", get(videos::timeline))
}
