//! Learner roster and engagement presentation.

use std::collections::BTreeMap;

use serde::Serialize;

use insights_core::formats::DateFormats;
use insights_core::learner;
use insights_core::ranges::EngagementRanges;
use insights_core::serialize::value_or_default;
use insights_db::models::engagement as rows;
use insights_search::roster::{CourseMetadataAggregates, RosterEntry};

/// Per-learner engagement counts embedded in a roster entry.
#[derive(Debug, Serialize)]
pub struct LearnerEngagements {
    pub discussion_contributions: i64,
    pub problems_attempted: i64,
    pub problems_completed: i64,
    pub videos_viewed: i64,
    pub problem_attempts_per_completed: Option<f64>,
}

/// One learner in a course roster.
#[derive(Debug, Serialize)]
pub struct Learner {
    pub username: String,
    pub enrollment_mode: Option<String>,
    pub name: Option<String>,
    pub account_url: Option<String>,
    pub email: Option<String>,
    pub segments: Vec<String>,
    pub engagements: LearnerEngagements,
    pub enrollment_date: Option<String>,
    pub cohort: Option<String>,
}

impl Learner {
    /// Present an index entry. `account_base_url` is the deployment's user
    /// account prefix; without it `account_url` is null rather than a
    /// relative path.
    pub fn from_entry(
        entry: &RosterEntry,
        account_base_url: Option<&str>,
        formats: &DateFormats,
    ) -> Self {
        let account_url = account_base_url
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), entry.username));

        Self {
            username: entry.username.clone(),
            enrollment_mode: entry.enrollment_mode.clone(),
            name: entry.name.clone(),
            account_url,
            email: entry.email.clone(),
            segments: entry.segments.clone(),
            engagements: LearnerEngagements {
                discussion_contributions: entry.discussion_contributions,
                problems_attempted: entry.problems_attempted,
                problems_completed: entry.problems_completed,
                videos_viewed: entry.videos_viewed,
                problem_attempts_per_completed: entry.problem_attempts_per_completed,
            },
            enrollment_date: entry.enrollment_date.map(|day| formats.format_date(day)),
            cohort: entry.cohort.clone(),
        }
    }
}

/// One day of a learner's engagement timeline. Days with no events of a
/// kind report 0 for that metric.
#[derive(Debug, Serialize)]
pub struct EngagementDay {
    pub date: String,
    pub problems_attempted: i64,
    pub problems_completed: i64,
    pub discussion_contributions: i64,
    pub videos_viewed: i64,
}

impl EngagementDay {
    pub fn from_row(row: &rows::EngagementDay, formats: &DateFormats) -> Self {
        Self {
            date: formats.format_date(row.date),
            problems_attempted: value_or_default(row.problems_attempted, 0),
            problems_completed: value_or_default(row.problems_completed, 0),
            discussion_contributions: value_or_default(row.discussion_contributions, 0),
            videos_viewed: value_or_default(row.videos_viewed, 0),
        }
    }
}

/// Engagement timeline envelope.
#[derive(Debug, Serialize)]
pub struct EngagementTimeline {
    pub days: Vec<EngagementDay>,
}

/// Course-level roster facets plus the engagement range table.
#[derive(Debug, Serialize)]
pub struct CourseLearnerMetadata {
    pub enrollment_modes: BTreeMap<String, i64>,
    pub segments: BTreeMap<String, i64>,
    pub cohorts: BTreeMap<String, i64>,
    pub engagement_ranges: EngagementRanges,
}

impl CourseLearnerMetadata {
    /// Combine index facets with range rows. Every known segment label
    /// appears in `segments`, zero-filled when the index has no bucket
    /// for it; modes and cohorts list only what the index reports.
    pub fn new(aggregates: CourseMetadataAggregates, engagement_ranges: EngagementRanges) -> Self {
        let mut segments = aggregates.segments;
        for segment in learner::SEGMENTS {
            segments.entry((*segment).to_string()).or_insert(0);
        }

        Self {
            enrollment_modes: aggregates.enrollment_modes,
            segments,
            cohorts: aggregates.cohorts,
            engagement_ranges,
        }
    }
}
