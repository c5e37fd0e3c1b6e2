//! HTTP-level integration tests for the service views.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! The database pool is unreachable, so these tests also pin down how the
//! health view reports an outage.

mod common;

use std::sync::Arc;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use serde_json::json;

use common::{body_json, build_test_app, get, StubRoster};
use insights_search::roster::RosterSearch;

// ---------------------------------------------------------------------------
// Test: GET /status reports liveness
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_reports_alive() {
    let app = build_test_app(None);
    let response = get(app, "/status").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"alive": true}));
}

// ---------------------------------------------------------------------------
// Test: GET /health stays 200 and reports each backing store separately
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_the_database_outage() {
    let app = build_test_app(None);
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        body_json(response).await,
        json!({
            "overall_status": "UNAVAILABLE",
            "detailed_status": {
                "database_connection": "UNAVAILABLE",
                "search_connection": "UNAVAILABLE"
            }
        })
    );
}

#[tokio::test]
async fn health_reports_search_independently_of_the_database() {
    // The index is configured, the database is not. The database alone
    // drives the overall verdict.
    let roster: Arc<dyn RosterSearch> = Arc::new(StubRoster::default());
    let app = build_test_app(Some(roster));
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        body_json(response).await,
        json!({
            "overall_status": "UNAVAILABLE",
            "detailed_status": {
                "database_connection": "UNAVAILABLE",
                "search_connection": "OK"
            }
        })
    );
}

// ---------------------------------------------------------------------------
// Test: GET /authenticated answers with an empty object
// ---------------------------------------------------------------------------

#[tokio::test]
async fn authenticated_returns_an_empty_object() {
    let app = build_test_app(None);
    let response = get(app, "/authenticated").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({}));
}

// ---------------------------------------------------------------------------
// Test: versioned service paths redirect to the root views
// ---------------------------------------------------------------------------

#[tokio::test]
async fn versioned_service_paths_redirect_to_the_root_views() {
    let cases = [
        ("/api/v0/status/", "/status"),
        ("/api/v0/health/", "/health"),
        ("/api/v0/authenticated/", "/authenticated"),
    ];

    for (alias, target) in cases {
        let app = build_test_app(None);
        let response = get(app, alias).await;
        assert_eq!(
            response.status(),
            StatusCode::TEMPORARY_REDIRECT,
            "alias: {alias}"
        );
        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            target,
            "alias: {alias}"
        );
    }
}

// ---------------------------------------------------------------------------
// Test: unknown routes answer with the standard error body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_routes_get_the_standard_error_body() {
    for path in ["/nope", "/api/v0/nope"] {
        let app = build_test_app(None);
        let response = get(app, path).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "path: {path}");
        assert_eq!(
            body_json(response).await,
            json!({"error_code": "not_found", "developer_message": "Not found."}),
            "path: {path}"
        );
    }
}

// ---------------------------------------------------------------------------
// Test: every response carries a request id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = build_test_app(None);
    let response = get(app, "/status").await;
    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header must be set");
    assert!(!request_id.is_empty());
}
