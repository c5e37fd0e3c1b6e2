//! Shared scaffolding for the API integration tests.
//!
//! The tests run without live backing stores. The pool is built lazily
//! against a closed port, so endpoints that stay out of the database behave
//! normally and endpoints that reach it observe a connection error; the
//! roster index is an in-memory stub behind the same trait the production
//! client implements.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use insights_api::config::ApiConfig;
use insights_api::routes;
use insights_api::state::AppState;
use insights_core::formats::DateFormats;
use insights_search::query::RosterParams;
use insights_search::roster::{CourseMetadataAggregates, RosterEntry, RosterPage, RosterSearch};
use insights_search::SearchError;

/// Build a test `ApiConfig` with safe defaults and the account URL base the
/// learner payload assertions expect.
pub fn test_config() -> ApiConfig {
    ApiConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8110".to_string()],
        request_timeout_secs: 30,
        formats: DateFormats::default(),
        lms_user_account_base_url: Some("http://lms-host".to_string()),
    }
}

/// A pool that points at a closed port and never actually connects at
/// construction time. The short acquire timeout makes a database touch fail
/// fast instead of retrying into the request timeout.
pub fn unreachable_pool() -> insights_db::DbPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(100))
        .connect_lazy("postgres://postgres@127.0.0.1:1/insights")
        .expect("lazy pool construction does not touch the network")
}

/// In-memory roster index.
#[derive(Default)]
pub struct StubRoster {
    pub entries: Vec<RosterEntry>,
    /// When set, reported as the index-wide match total instead of the
    /// entry count; the pagination envelope must trust this number.
    pub total_override: Option<u64>,
    pub aggregates: CourseMetadataAggregates,
}

#[async_trait]
impl RosterSearch for StubRoster {
    async fn find_learner(
        &self,
        username: &str,
        course_id: &str,
    ) -> Result<Option<RosterEntry>, SearchError> {
        Ok(self
            .entries
            .iter()
            .find(|entry| entry.username == username && entry.course_id == course_id)
            .cloned())
    }

    async fn list_learners(&self, params: &RosterParams) -> Result<RosterPage, SearchError> {
        let matching: Vec<RosterEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.course_id == params.course_id)
            .cloned()
            .collect();
        let total = self.total_override.unwrap_or(matching.len() as u64);

        let offset = (params.page as usize - 1) * params.page_size as usize;
        let entries = matching
            .into_iter()
            .skip(offset)
            .take(params.page_size as usize)
            .collect();

        Ok(RosterPage {
            total,
            took: None,
            entries,
        })
    }

    async fn course_metadata(
        &self,
        _course_id: &str,
    ) -> Result<CourseMetadataAggregates, SearchError> {
        Ok(self.aggregates.clone())
    }
}

/// Build the full application router with the production middleware stack
/// over the given roster index.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(roster: Option<Arc<dyn RosterSearch>>) -> Router {
    let state = AppState {
        pool: unreachable_pool(),
        config: Arc::new(test_config()),
        roster,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:8110".parse().unwrap()])
        .allow_methods([Method::GET])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::service::router())
        .nest("/api/v0", routes::api_routes())
        .fallback(routes::not_found)
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Issue a GET request against the app. The host header matches the one
/// the pagination link assertions expect.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header("host", "testserver")
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
