//! Roster documents and the search-backed store.
//!
//! [`RosterSearch`] is the seam the HTTP layer programs against; the handlers
//! and the pagination adapter only ever see this trait, so tests drive them
//! with an in-memory stub. [`HttpRosterSearch`] is the production
//! implementation over the index's `_search` endpoint.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde_json::Value;

use insights_core::serialize::{none_if_empty, require_field, value_or_default};
use insights_core::types::Day;

use crate::query::{learner_query, metadata_query, roster_query, RosterParams};
use crate::transport::Transport;
use crate::SearchError;

/// One learner document, normalized at the index boundary.
///
/// Normalization rules: empty-string cohort becomes `None`, a missing
/// segments field becomes the empty list, absent countable engagement
/// fields become 0, and `problem_attempts_per_completed` keeps null (a
/// learner with no completions has no ratio, which is not the same as 0).
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub username: String,
    pub course_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub enrollment_mode: Option<String>,
    pub enrollment_date: Option<Day>,
    pub cohort: Option<String>,
    pub segments: Vec<String>,
    pub problems_attempted: i64,
    pub problems_completed: i64,
    pub problem_attempts_per_completed: Option<f64>,
    pub discussion_contributions: i64,
    pub videos_viewed: i64,
}

impl RosterEntry {
    /// Normalize one stored document. A document without `username` or
    /// `course_id` violates the index contract and is reported as a missing
    /// required field rather than patched over.
    pub fn from_document(doc: &Value) -> Result<Self, SearchError> {
        let username = require_field(string_field(doc, "username"), "username")?;
        let course_id = require_field(string_field(doc, "course_id"), "course_id")?;

        let segments = doc
            .get("segments")
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let enrollment_date = doc
            .get("enrollment_date")
            .and_then(Value::as_str)
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());

        Ok(Self {
            username,
            course_id,
            name: string_field(doc, "name"),
            email: string_field(doc, "email"),
            enrollment_mode: string_field(doc, "enrollment_mode"),
            enrollment_date,
            cohort: none_if_empty(string_field(doc, "cohort")),
            segments,
            problems_attempted: count_field(doc, "problems_attempted"),
            problems_completed: count_field(doc, "problems_completed"),
            problem_attempts_per_completed: doc
                .get("problem_attempts_per_completed")
                .and_then(Value::as_f64),
            discussion_contributions: count_field(doc, "discussion_contributions"),
            videos_viewed: count_field(doc, "videos_viewed"),
        })
    }
}

fn string_field(doc: &Value, field: &str) -> Option<String> {
    doc.get(field).and_then(Value::as_str).map(str::to_string)
}

fn count_field(doc: &Value, field: &str) -> i64 {
    value_or_default(doc.get(field).and_then(Value::as_i64), 0)
}

/// One executed page of roster results.
///
/// `total` is the index-wide match count reported by the executed query,
/// never the length of `entries`.
#[derive(Debug, Clone)]
pub struct RosterPage {
    pub total: u64,
    pub took: Option<u64>,
    pub entries: Vec<RosterEntry>,
}

impl RosterPage {
    /// Parse a `_search` response. Accepts both wire shapes of
    /// `hits.total`: the bare number older clusters return and the
    /// `{"value": n, ...}` object of newer ones.
    pub fn from_response(response: &Value) -> Result<Self, SearchError> {
        let hits = response
            .get("hits")
            .ok_or(SearchError::Malformed("missing hits"))?;

        let total = match hits.get("total") {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
            Some(Value::Object(o)) => o.get("value").and_then(Value::as_u64).unwrap_or(0),
            _ => return Err(SearchError::Malformed("missing hits.total")),
        };

        let entries = hits
            .get("hits")
            .and_then(Value::as_array)
            .map(|hits| {
                hits.iter()
                    .map(|hit| {
                        let source = hit
                            .get("_source")
                            .ok_or(SearchError::Malformed("hit without _source"))?;
                        RosterEntry::from_document(source)
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            total,
            took: response.get("took").and_then(Value::as_u64),
            entries,
        })
    }
}

/// Per-course aggregation buckets behind the learner metadata endpoint.
#[derive(Debug, Clone, Default)]
pub struct CourseMetadataAggregates {
    pub enrollment_modes: BTreeMap<String, i64>,
    pub segments: BTreeMap<String, i64>,
    pub cohorts: BTreeMap<String, i64>,
}

impl CourseMetadataAggregates {
    /// Parse the aggregation section of a metadata query response. Missing
    /// aggregations read as empty buckets.
    pub fn from_response(response: &Value) -> Self {
        let aggs = response.get("aggregations").cloned().unwrap_or(Value::Null);
        Self {
            enrollment_modes: bucket_counts(&aggs, "enrollment_modes"),
            segments: bucket_counts(&aggs, "segments"),
            cohorts: bucket_counts(&aggs, "cohorts"),
        }
    }
}

fn bucket_counts(aggs: &Value, name: &str) -> BTreeMap<String, i64> {
    aggs.get(name)
        .and_then(|agg| agg.get("buckets"))
        .and_then(Value::as_array)
        .map(|buckets| {
            buckets
                .iter()
                .filter_map(|bucket| {
                    let key = bucket.get("key").and_then(Value::as_str)?;
                    let count = bucket.get("doc_count").and_then(Value::as_i64)?;
                    Some((key.to_string(), count))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Read access to the learner roster index.
#[async_trait]
pub trait RosterSearch: Send + Sync {
    /// Fetch one learner's document for a course, if indexed.
    async fn find_learner(
        &self,
        username: &str,
        course_id: &str,
    ) -> Result<Option<RosterEntry>, SearchError>;

    /// Execute a roster listing and return the requested page along with
    /// the index-wide match total.
    async fn list_learners(&self, params: &RosterParams) -> Result<RosterPage, SearchError>;

    /// Aggregate enrollment modes, segments, and cohorts across a course.
    async fn course_metadata(
        &self,
        course_id: &str,
    ) -> Result<CourseMetadataAggregates, SearchError>;
}

/// HTTP client for the roster index.
#[derive(Debug)]
pub struct HttpRosterSearch {
    client: reqwest::Client,
    host: String,
    authority: String,
    index: String,
    transport: Transport,
}

impl HttpRosterSearch {
    /// Create a client for one cluster.
    ///
    /// * `host` - Base URL, e.g. `http://localhost:9200` or a managed
    ///   domain endpoint.
    /// * `index` - Index name queried for every roster operation.
    pub fn new(host: &str, index: &str, transport: Transport) -> Result<Self, SearchError> {
        let url = reqwest::Url::parse(host)
            .map_err(|e| SearchError::Config(format!("invalid search host {host:?}: {e}")))?;
        let authority = match (url.host_str(), url.port()) {
            (Some(h), Some(p)) => format!("{h}:{p}"),
            (Some(h), None) => h.to_string(),
            _ => {
                return Err(SearchError::Config(format!(
                    "search host {host:?} has no authority component"
                )))
            }
        };

        Ok(Self {
            client: reqwest::Client::new(),
            host: host.trim_end_matches('/').to_string(),
            authority,
            index: index.to_string(),
            transport,
        })
    }

    /// POST one `_search` body and parse the JSON response.
    async fn search(&self, body: &Value) -> Result<Value, SearchError> {
        let path = format!("/{}/_search", self.index);
        let payload = serde_json::to_vec(body)?;

        let mut request = self
            .client
            .post(format!("{}{}", self.host, path))
            .header("content-type", "application/json");

        if let Transport::AwsSigV4(signer) = &self.transport {
            let signed = signer.sign("POST", &self.authority, &path, "", &payload, Utc::now());
            request = request
                .header("x-amz-date", signed.amz_date)
                .header("authorization", signed.authorization);
        }

        tracing::debug!(index = %self.index, "executing roster search");
        let response = request.body(payload).send().await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, capturing the status
    /// and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, SearchError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SearchError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body.
    async fn parse_response(response: reqwest::Response) -> Result<Value, SearchError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl RosterSearch for HttpRosterSearch {
    async fn find_learner(
        &self,
        username: &str,
        course_id: &str,
    ) -> Result<Option<RosterEntry>, SearchError> {
        let response = self.search(&learner_query(username, course_id)).await?;
        let page = RosterPage::from_response(&response)?;
        Ok(page.entries.into_iter().next())
    }

    async fn list_learners(&self, params: &RosterParams) -> Result<RosterPage, SearchError> {
        let response = self.search(&roster_query(params)).await?;
        RosterPage::from_response(&response)
    }

    async fn course_metadata(
        &self,
        course_id: &str,
    ) -> Result<CourseMetadataAggregates, SearchError> {
        let response = self.search(&metadata_query(course_id)).await?;
        Ok(CourseMetadataAggregates::from_response(&response))
    }
}
