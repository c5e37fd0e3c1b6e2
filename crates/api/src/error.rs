use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use insights_core::error::CoreError;
use insights_search::SearchError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the published JSON error body
/// `{"error_code": …, "developer_message": …}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A domain-level error from `insights_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A search-index error from the roster client.
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// A roster-backed endpoint was called with no search host configured.
    #[error("Search index not configured")]
    SearchUnavailable,

    /// The requested course/module/video has no rows at all.
    #[error("Not found")]
    NotFound,

    /// A pagination request past the final page.
    #[error("Invalid page")]
    InvalidPage,
}

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Core(core) => classify_core_error(core),
            ApiError::Database(err) => classify_sqlx_error(err),
            ApiError::Search(err) => classify_search_error(err),

            ApiError::SearchUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "search_index_unavailable",
                "Learner data is temporarily unavailable. Try again later.".to_string(),
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                "not_found",
                "Not found.".to_string(),
            ),
            ApiError::InvalidPage => (
                StatusCode::NOT_FOUND,
                "not_found",
                "Invalid page.".to_string(),
            ),
        };

        let body = json!({
            "error_code": code,
            "developer_message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a domain error onto the published status/error_code contract. The
/// developer message is the error's Display text, which clients show as-is.
fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    let status = match err {
        CoreError::CourseNotSpecified
        | CoreError::CourseKeyMalformed { .. }
        | CoreError::ParameterValue(_) => StatusCode::BAD_REQUEST,
        CoreError::LearnerNotFound { .. } | CoreError::TimelineNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        CoreError::ReportFieldMissing { .. } => {
            tracing::error!(error = %err, "Input row missing a required field");
            StatusCode::INTERNAL_SERVER_ERROR
        }
        CoreError::Internal(_) => {
            tracing::error!(error = %err, "Internal core error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.error_code(), err.to_string())
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message; the real error
///   goes to the log, never to the client.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "not_found",
            "Not found.".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred.".to_string(),
            )
        }
    }
}

/// Classify a roster-client error. Transport and cluster failures surface as
/// the index being unavailable; a document that violates the index contract
/// is an input-shape defect and follows the core-error mapping.
fn classify_search_error(err: &SearchError) -> (StatusCode, &'static str, String) {
    match err {
        SearchError::Request(_) | SearchError::Api { .. } => {
            tracing::error!(error = %err, "Search index unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "search_index_unavailable",
                "Learner data is temporarily unavailable. Try again later.".to_string(),
            )
        }
        SearchError::Core(core) => classify_core_error(core),
        other => {
            tracing::error!(error = %other, "Search client error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred.".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_keep_their_published_codes() {
        let (status, code, message) = classify_core_error(&CoreError::CourseNotSpecified);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "course_not_specified");
        assert_eq!(message, "Course id/key not specified.");

        let (status, code, _) = classify_core_error(&CoreError::LearnerNotFound {
            username: "a_user".into(),
            course_id: "edX/DemoX/Demo_Course".into(),
        });
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "no_learner_for_course");

        let (status, code, _) =
            classify_core_error(&CoreError::ReportFieldMissing { field: "username" });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "report_field_missing");
    }

    #[test]
    fn database_errors_are_sanitized() {
        let (status, code, message) = classify_sqlx_error(&sqlx::Error::PoolTimedOut);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "internal_error");
        assert_eq!(message, "An internal error occurred.");

        let (status, code, _) = classify_sqlx_error(&sqlx::Error::RowNotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "not_found");
    }

    #[test]
    fn search_transport_failures_read_as_unavailable() {
        let (status, code, _) = classify_search_error(&SearchError::Api {
            status: 502,
            body: "bad gateway".into(),
        });
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(code, "search_index_unavailable");

        // A contract-violating document is a 500, not a 503.
        let (status, code, _) = classify_search_error(&SearchError::Core(
            CoreError::ReportFieldMissing { field: "username" },
        ));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "report_field_missing");
    }

    #[test]
    fn invalid_page_is_a_not_found() {
        assert_eq!(
            ApiError::InvalidPage.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::SearchUnavailable.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
