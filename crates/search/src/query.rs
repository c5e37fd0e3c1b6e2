//! Roster query construction.
//!
//! Builders here are pure: they turn validated parameters into the JSON
//! bodies the index `_search` endpoint accepts. Execution lives in
//! [`crate::roster`], so every shape below is unit-testable without a
//! cluster.

use serde_json::{json, Map, Value};

use insights_core::learner::{DEFAULT_ORDER_BY, DEFAULT_PAGE_SIZE, SORT_ASCENDING};

/// Validated parameters for a roster listing.
#[derive(Debug, Clone)]
pub struct RosterParams {
    pub course_id: String,
    pub segments: Vec<String>,
    pub ignore_segments: Vec<String>,
    pub cohort: Option<String>,
    pub enrollment_mode: Option<String>,
    pub text_search: Option<String>,
    pub order_by: String,
    pub sort_order: String,
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
}

impl RosterParams {
    /// Parameters for listing a whole course roster with default ordering
    /// and paging.
    pub fn new(course_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            segments: Vec::new(),
            ignore_segments: Vec::new(),
            cohort: None,
            enrollment_mode: None,
            text_search: None,
            order_by: DEFAULT_ORDER_BY.to_string(),
            sort_order: SORT_ASCENDING.to_string(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Zero-based index of the first document on the requested page.
    pub fn offset(&self) -> u32 {
        (self.page - 1) * self.page_size
    }
}

/// Build the `_search` body for a roster listing.
pub fn roster_query(params: &RosterParams) -> Value {
    let mut must = vec![json!({"term": {"course_id": params.course_id}})];
    if !params.segments.is_empty() {
        must.push(json!({"terms": {"segments": params.segments}}));
    }
    if let Some(cohort) = &params.cohort {
        must.push(json!({"term": {"cohort": cohort}}));
    }
    if let Some(mode) = &params.enrollment_mode {
        must.push(json!({"term": {"enrollment_mode": mode}}));
    }
    if let Some(text) = &params.text_search {
        must.push(json!({
            "multi_match": {
                "query": text,
                "fields": ["name", "username", "email"],
            }
        }));
    }

    let mut bool_query = Map::new();
    bool_query.insert("must".to_string(), Value::Array(must));
    if !params.ignore_segments.is_empty() {
        bool_query.insert(
            "must_not".to_string(),
            json!([{"terms": {"segments": params.ignore_segments}}]),
        );
    }

    // json! keys must be literals; the sort field name is runtime data.
    let mut sort_field = Map::new();
    sort_field.insert(
        params.order_by.clone(),
        json!({"order": params.sort_order}),
    );

    json!({
        "query": {"bool": Value::Object(bool_query)},
        "sort": [Value::Object(sort_field)],
        "from": params.offset(),
        "size": params.page_size,
    })
}

/// Build the `_search` body that fetches one learner's document.
pub fn learner_query(username: &str, course_id: &str) -> Value {
    json!({
        "query": {
            "bool": {
                "must": [
                    {"term": {"username": username}},
                    {"term": {"course_id": course_id}},
                ]
            }
        },
        "size": 1,
    })
}

/// Build the aggregation-only `_search` body behind course learner metadata.
pub fn metadata_query(course_id: &str) -> Value {
    json!({
        "query": {"term": {"course_id": course_id}},
        "size": 0,
        "aggs": {
            "enrollment_modes": {"terms": {"field": "enrollment_mode", "size": 100}},
            "segments": {"terms": {"field": "segments", "size": 100}},
            "cohorts": {"terms": {"field": "cohort", "size": 100}},
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_params_filter_by_course_and_sort_by_username() {
        let body = roster_query(&RosterParams::new("course-v1:edX+DemoX+2015"));
        assert_eq!(
            body["query"]["bool"]["must"],
            json!([{"term": {"course_id": "course-v1:edX+DemoX+2015"}}])
        );
        assert!(body["query"]["bool"].get("must_not").is_none());
        assert_eq!(body["sort"], json!([{"username": {"order": "asc"}}]));
        assert_eq!(body["from"], json!(0));
        assert_eq!(body["size"], json!(DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn optional_filters_land_in_the_bool_clauses() {
        let mut params = RosterParams::new("edX/DemoX/T1");
        params.segments = vec!["struggling".to_string(), "inactive".to_string()];
        params.cohort = Some("alpha".to_string());
        params.enrollment_mode = Some("verified".to_string());
        params.text_search = Some("ada".to_string());

        let body = roster_query(&params);
        let must = body["query"]["bool"]["must"].as_array().unwrap();
        assert_eq!(must.len(), 5);
        assert!(must.contains(&json!({"terms": {"segments": ["struggling", "inactive"]}})));
        assert!(must.contains(&json!({"term": {"cohort": "alpha"}})));
        assert!(must.contains(&json!({"term": {"enrollment_mode": "verified"}})));
        assert!(must.contains(&json!({
            "multi_match": {"query": "ada", "fields": ["name", "username", "email"]}
        })));
    }

    #[test]
    fn ignore_segments_become_a_must_not_clause() {
        let mut params = RosterParams::new("edX/DemoX/T1");
        params.ignore_segments = vec!["unenrolled".to_string()];
        let body = roster_query(&params);
        assert_eq!(
            body["query"]["bool"]["must_not"],
            json!([{"terms": {"segments": ["unenrolled"]}}])
        );
    }

    #[test]
    fn paging_translates_to_from_and_size() {
        let mut params = RosterParams::new("edX/DemoX/T1");
        params.page = 3;
        params.page_size = 40;
        let body = roster_query(&params);
        assert_eq!(body["from"], json!(80));
        assert_eq!(body["size"], json!(40));
    }

    #[test]
    fn descending_sort_carries_the_requested_field() {
        let mut params = RosterParams::new("edX/DemoX/T1");
        params.order_by = "problems_attempted".to_string();
        params.sort_order = "desc".to_string();
        let body = roster_query(&params);
        assert_eq!(
            body["sort"],
            json!([{"problems_attempted": {"order": "desc"}}])
        );
    }

    #[test]
    fn learner_query_pins_username_and_course() {
        let body = learner_query("ada", "edX/DemoX/T1");
        assert_eq!(
            body["query"]["bool"]["must"],
            json!([
                {"term": {"username": "ada"}},
                {"term": {"course_id": "edX/DemoX/T1"}},
            ])
        );
        assert_eq!(body["size"], json!(1));
    }

    #[test]
    fn metadata_query_requests_only_aggregations() {
        let body = metadata_query("edX/DemoX/T1");
        assert_eq!(body["size"], json!(0));
        for agg in ["enrollment_modes", "segments", "cohorts"] {
            assert!(body["aggs"].get(agg).is_some(), "{agg} aggregation missing");
        }
    }
}
