//! Engagement range shaper.
//!
//! The pipeline classifies each engagement metric for a course into three
//! cohort buckets (`low`, `normal`, `high`), one row per bucket. This module
//! reassembles those rows into the shape the metadata endpoint exposes: per
//! metric, a `(below_average, average, above_average)` triple where each
//! bucket is a `[low_value, high_value]` pair or null.
//!
//! Every known metric is always emitted, even when the pipeline produced no
//! rows for it at all; only the bucket contents can be null.

use chrono::NaiveDate;
use serde::Serialize;

use crate::engagement_events;
use crate::formats::DateFormats;

/// Range-type discriminators as stored in the fact table.
pub const RANGE_LOW: &str = "low";
pub const RANGE_NORMAL: &str = "normal";
pub const RANGE_HIGH: &str = "high";

/// One `(metric, range_type)` row from the metric-ranges fact table.
#[derive(Debug, Clone)]
pub struct MetricRangeRow {
    pub metric: String,
    pub range_type: String,
    pub low_value: f64,
    pub high_value: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// The overall date window the ranges were computed over, rendered with the
/// date-only format. Both bounds are null when no rows exist for the course.
#[derive(Debug, Serialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Bucket triple for one metric.
#[derive(Debug, Serialize)]
pub struct EngagementRangeMetric {
    pub below_average: Option<[f64; 2]>,
    pub average: Option<[f64; 2]>,
    pub above_average: Option<[f64; 2]>,
}

impl EngagementRangeMetric {
    /// Assemble the triple for `metric`. When several rows carry the same
    /// `(metric, range_type)` the first in input order wins; the rest are
    /// ignored.
    pub fn from_rows(rows: &[MetricRangeRow], metric: &str) -> Self {
        Self {
            below_average: bucket(rows, metric, RANGE_LOW),
            average: bucket(rows, metric, RANGE_NORMAL),
            above_average: bucket(rows, metric, RANGE_HIGH),
        }
    }
}

fn bucket(rows: &[MetricRangeRow], metric: &str, range_type: &str) -> Option<[f64; 2]> {
    rows.iter()
        .find(|row| row.metric == metric && row.range_type == range_type)
        .map(|row| [row.low_value, row.high_value])
}

/// Shaper output: the date window plus one triple per known metric.
///
/// Metrics are fixed struct fields rather than a map so adding a metric to
/// [`engagement_events::EVENTS`] without wiring it here fails to compile
/// the exhaustiveness test below instead of silently dropping data.
#[derive(Debug, Serialize)]
pub struct EngagementRanges {
    pub date_range: DateRange,
    pub problems_attempted: EngagementRangeMetric,
    pub problems_completed: EngagementRangeMetric,
    pub discussion_contributions: EngagementRangeMetric,
    pub videos_viewed: EngagementRangeMetric,
    pub problem_attempts_per_completed: EngagementRangeMetric,
}

impl EngagementRanges {
    /// Shape a course's metric-range rows. `rows` may be empty; the output
    /// then carries a null date range and all-null buckets.
    pub fn from_rows(rows: &[MetricRangeRow], formats: &DateFormats) -> Self {
        let date_range = match rows.first() {
            Some(first) => DateRange {
                start: Some(formats.format_date(first.start_date)),
                end: Some(formats.format_date(first.end_date)),
            },
            None => DateRange {
                start: None,
                end: None,
            },
        };

        Self {
            date_range,
            problems_attempted: EngagementRangeMetric::from_rows(
                rows,
                engagement_events::PROBLEMS_ATTEMPTED,
            ),
            problems_completed: EngagementRangeMetric::from_rows(
                rows,
                engagement_events::PROBLEMS_COMPLETED,
            ),
            discussion_contributions: EngagementRangeMetric::from_rows(
                rows,
                engagement_events::DISCUSSION_CONTRIBUTIONS,
            ),
            videos_viewed: EngagementRangeMetric::from_rows(
                rows,
                engagement_events::VIDEOS_VIEWED,
            ),
            problem_attempts_per_completed: EngagementRangeMetric::from_rows(
                rows,
                engagement_events::PROBLEM_ATTEMPTS_PER_COMPLETED,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(metric: &str, range_type: &str, low: f64, high: f64) -> MetricRangeRow {
        MetricRangeRow {
            metric: metric.to_string(),
            range_type: range_type.to_string(),
            low_value: low,
            high_value: high,
            start_date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2015, 2, 1).unwrap(),
        }
    }

    #[test]
    fn metrics_without_rows_are_emitted_with_null_buckets() {
        let rows = vec![row("problems_attempted", "low", 0.0, 3.0)];
        let shaped = EngagementRanges::from_rows(&rows, &DateFormats::default());

        assert_eq!(shaped.problems_attempted.below_average, Some([0.0, 3.0]));
        assert_eq!(shaped.problems_attempted.average, None);
        assert_eq!(shaped.problems_attempted.above_average, None);

        // videos_viewed has no rows at all but is still present, all null.
        assert_eq!(shaped.videos_viewed.below_average, None);
        assert_eq!(shaped.videos_viewed.average, None);
        assert_eq!(shaped.videos_viewed.above_average, None);
    }

    #[test]
    fn duplicate_rows_resolve_to_the_first_in_input_order() {
        let rows = vec![
            row("videos_viewed", "normal", 1.0, 2.0),
            row("videos_viewed", "normal", 8.0, 9.0),
        ];
        let shaped = EngagementRanges::from_rows(&rows, &DateFormats::default());
        assert_eq!(shaped.videos_viewed.average, Some([1.0, 2.0]));
    }

    #[test]
    fn date_range_comes_from_the_first_row_and_uses_the_date_format() {
        let rows = vec![row("problems_completed", "high", 5.0, 10.0)];
        let shaped = EngagementRanges::from_rows(&rows, &DateFormats::default());
        assert_eq!(shaped.date_range.start.as_deref(), Some("2015-01-01"));
        assert_eq!(shaped.date_range.end.as_deref(), Some("2015-02-01"));

        let empty = EngagementRanges::from_rows(&[], &DateFormats::default());
        assert_eq!(empty.date_range.start, None);
        assert_eq!(empty.date_range.end, None);
    }

    #[test]
    fn serialized_output_carries_every_known_metric() {
        let shaped = EngagementRanges::from_rows(&[], &DateFormats::default());
        let json = serde_json::to_value(&shaped).unwrap();
        let object = json.as_object().unwrap();

        for metric in engagement_events::EVENTS {
            let entry = object
                .get(*metric)
                .unwrap_or_else(|| panic!("metric {metric} missing from output"));
            assert!(entry.get("below_average").unwrap().is_null());
            assert!(entry.get("average").unwrap().is_null());
            assert!(entry.get("above_average").unwrap().is_null());
        }
        assert!(object.contains_key("date_range"));
    }

    #[test]
    fn buckets_render_as_low_high_pairs() {
        let rows = vec![
            row("discussion_contributions", "low", 0.0, 1.5),
            row("discussion_contributions", "normal", 1.5, 4.0),
            row("discussion_contributions", "high", 4.0, 20.0),
        ];
        let shaped = EngagementRanges::from_rows(&rows, &DateFormats::default());
        let json = serde_json::to_value(&shaped).unwrap();
        assert_eq!(
            json["discussion_contributions"]["average"],
            serde_json::json!([1.5, 4.0])
        );
    }
}
