//! HTTP-level integration tests for the course, problem, and video endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! The database pool points at a closed port, which pins down two contracts
//! at once: parameter validation must answer before any query is attempted,
//! and a query failure must surface as the sanitized 500 body rather than a
//! driver error.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use common::{body_json, build_test_app, get, StubRoster};
use insights_search::roster::RosterSearch;

fn app_with_stub_roster() -> axum::Router {
    // A roster is configured so a failure can only come from the database.
    let roster: Arc<dyn RosterSearch> = Arc::new(StubRoster::default());
    build_test_app(Some(roster))
}

// ---------------------------------------------------------------------------
// Test: course id validation answers before the database is touched
// ---------------------------------------------------------------------------

#[tokio::test]
async fn course_endpoints_validate_the_course_id_first() {
    let paths = [
        "/api/v0/courses/malformed-course-id/activity/",
        "/api/v0/courses/malformed-course-id/recent_activity/",
        "/api/v0/courses/malformed-course-id/enrollment/",
        "/api/v0/courses/malformed-course-id/enrollment/mode/",
        "/api/v0/courses/malformed-course-id/enrollment/gender/",
        "/api/v0/courses/malformed-course-id/enrollment/education/",
        "/api/v0/courses/malformed-course-id/enrollment/birth_year/",
        "/api/v0/courses/malformed-course-id/enrollment/location/",
        "/api/v0/courses/malformed-course-id/problems/",
        "/api/v0/courses/malformed-course-id/problems_and_tags/",
        "/api/v0/courses/malformed-course-id/videos/",
    ];

    // The pool is unreachable: a 400 here proves the query never ran.
    for path in paths {
        let response = get(app_with_stub_roster(), path).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "path: {path}");
        let body = body_json(response).await;
        assert_eq!(body["error_code"], "course_key_malformed", "path: {path}");
    }
}

// ---------------------------------------------------------------------------
// Test: a bad date parameter is rejected before the database
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_date_parameters_are_rejected_before_the_database() {
    let response = get(
        app_with_stub_roster(),
        "/api/v0/courses/edX%2FDemoX%2FDemo_Course/enrollment/?start_date=bad_date",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error_code"],
        "illegal_parameter_values"
    );

    let response = get(
        app_with_stub_roster(),
        "/api/v0/courses/edX%2FDemoX%2FDemo_Course/activity/?end_date=01/02/2015",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error_code"],
        "illegal_parameter_values"
    );
}

// ---------------------------------------------------------------------------
// Test: database failures surface as the sanitized 500 body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn database_failures_surface_as_a_sanitized_500() {
    let response = get(
        app_with_stub_roster(),
        "/api/v0/courses/edX%2FDemoX%2FDemo_Course/activity/",
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // Never the driver's message, only the published body.
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "error_code": "internal_error",
            "developer_message": "An internal error occurred."
        })
    );
}

// ---------------------------------------------------------------------------
// Test: both course key forms pass validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn modern_course_keys_are_accepted() {
    // A 500 (the dead database) rather than a 400 shows the key was accepted.
    let response = get(
        app_with_stub_roster(),
        "/api/v0/courses/course-v1:edX+DemoX+Demo_2014/problems/",
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn legacy_course_ids_arrive_percent_encoded() {
    let response = get(
        app_with_stub_roster(),
        "/api/v0/courses/edX%2FDemoX%2FDemo_Course/videos/",
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ---------------------------------------------------------------------------
// Test: module-level endpoints reach the database and sanitize its failure
// ---------------------------------------------------------------------------

#[tokio::test]
async fn module_endpoints_surface_the_sanitized_500() {
    let paths = [
        "/api/v0/problems/m1/answer_distribution/",
        "/api/v0/problems/m1/grade_distribution/",
        "/api/v0/problems/m1/sequential_open_distribution/",
        "/api/v0/videos/v1/timeline/",
    ];

    for path in paths {
        let response = get(app_with_stub_roster(), path).await;
        assert_eq!(
            response.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "path: {path}"
        );
        let body = body_json(response).await;
        assert_eq!(body["error_code"], "internal_error", "path: {path}");
    }
}

// ---------------------------------------------------------------------------
// Test: resource routes match only with their trailing slash
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resource_routes_require_the_trailing_slash() {
    let response = get(
        app_with_stub_roster(),
        "/api/v0/courses/edX%2FDemoX%2FDemo_Course/activity",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Unmatched paths still answer with the standard error body.
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({"error_code": "not_found", "developer_message": "Not found."})
    );
}
