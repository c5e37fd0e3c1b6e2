//! Course activity presentation.
//!
//! The pipeline stores one row per (interval, activity type) with upper-case
//! type names. On the wire, type names are lower-case and the `ACTIVE`
//! bucket (any activity at all) is called `any`.

use serde::Serialize;

use insights_core::formats::DateFormats;
use insights_db::models::activity as rows;

const ACTIVE: &str = "active";
/// Default `activity_type` for the most-recent-week endpoint.
pub const ANY: &str = "any";
const ATTEMPTED_PROBLEM: &str = "attempted_problem";
const PLAYED_VIDEO: &str = "played_video";

/// Wire rendering of a stored activity type: lower-cased, with the stored
/// `ACTIVE` bucket renamed to `any`.
pub fn presented_activity_type(stored: &str) -> String {
    let lowered = stored.to_lowercase();
    if lowered == ACTIVE {
        ANY.to_string()
    } else {
        lowered
    }
}

/// Reverse rename for querying: the API's `any` selects the stored `ACTIVE`
/// rows. The repository matches case-insensitively.
pub fn stored_activity_type(requested: &str) -> String {
    if requested.eq_ignore_ascii_case(ANY) {
        ACTIVE.to_string()
    } else {
        requested.to_string()
    }
}

// ---------------------------------------------------------------------------
// Most-recent-week view
// ---------------------------------------------------------------------------

/// One activity-type count for the most recent computed week.
#[derive(Debug, Serialize)]
pub struct RecentActivity {
    pub interval_start: String,
    pub interval_end: String,
    pub activity_type: String,
    pub count: i32,
    pub course_id: String,
}

impl RecentActivity {
    pub fn from_row(row: &rows::CourseActivityWeekly, formats: &DateFormats) -> Self {
        Self {
            interval_start: formats.format_datetime(row.interval_start),
            interval_end: formats.format_datetime(row.interval_end),
            activity_type: presented_activity_type(&row.activity_type),
            count: row.count,
            course_id: row.course_id.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Weekly pivot
// ---------------------------------------------------------------------------

/// One interval with its per-type counts pivoted into columns.
///
/// A type with no row for the interval serializes as null, never 0; the
/// pipeline writes a 0-count row when it observed the type.
#[derive(Debug, Serialize)]
pub struct WeeklyCourseActivity {
    pub interval_start: String,
    pub interval_end: String,
    pub course_id: String,
    pub any: Option<i32>,
    pub attempted_problem: Option<i32>,
    pub played_video: Option<i32>,
    pub created: String,
}

impl WeeklyCourseActivity {
    /// Pivot one interval's rows. Returns `None` for an empty group.
    fn from_interval(group: &[&rows::CourseActivityWeekly], formats: &DateFormats) -> Option<Self> {
        let first = group.first()?;

        let mut any = None;
        let mut attempted_problem = None;
        let mut played_video = None;
        let mut created = first.created;

        for row in group {
            match presented_activity_type(&row.activity_type).as_str() {
                ANY => any = Some(row.count),
                ATTEMPTED_PROBLEM => attempted_problem = Some(row.count),
                PLAYED_VIDEO => played_video = Some(row.count),
                // Types without a published column (the pipeline has shipped
                // and retired several) are not exposed.
                _ => {}
            }
            created = created.max(row.created);
        }

        Some(Self {
            interval_start: formats.format_datetime(first.interval_start),
            interval_end: formats.format_datetime(first.interval_end),
            course_id: first.course_id.clone(),
            any,
            attempted_problem,
            played_video,
            created: formats.format_datetime(created),
        })
    }
}

/// Pivot an interval-ordered row stream (one row per activity type per
/// interval) into one record per interval, preserving input order.
pub fn pivot_weekly(
    all_rows: &[rows::CourseActivityWeekly],
    formats: &DateFormats,
) -> Vec<WeeklyCourseActivity> {
    let mut out = Vec::new();
    let mut group: Vec<&rows::CourseActivityWeekly> = Vec::new();

    for row in all_rows {
        if let Some(first) = group.first() {
            if first.interval_start != row.interval_start || first.interval_end != row.interval_end
            {
                out.extend(WeeklyCourseActivity::from_interval(&group, formats));
                group.clear();
            }
        }
        group.push(row);
    }
    out.extend(WeeklyCourseActivity::from_interval(&group, formats));

    out
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn row(activity_type: &str, count: i32, start_day: u32) -> rows::CourseActivityWeekly {
        rows::CourseActivityWeekly {
            course_id: "edX/DemoX/Demo_Course".into(),
            interval_start: Utc.with_ymd_and_hms(2014, 5, start_day, 0, 0, 0).unwrap(),
            interval_end: Utc.with_ymd_and_hms(2014, 5, start_day + 7, 0, 0, 0).unwrap(),
            activity_type: activity_type.into(),
            count,
            created: Utc.with_ymd_and_hms(2014, 5, 29, 19, 7, 35).unwrap(),
        }
    }

    #[test]
    fn active_always_presents_as_any() {
        for stored in ["Active", "ACTIVE", "active"] {
            assert_eq!(presented_activity_type(stored), "any");
        }
        assert_eq!(presented_activity_type("PLAYED_VIDEO"), "played_video");
        assert_eq!(presented_activity_type("posted_forum"), "posted_forum");
    }

    #[test]
    fn any_queries_the_stored_active_rows() {
        assert_eq!(stored_activity_type("any"), "active");
        assert_eq!(stored_activity_type("ANY"), "active");
        assert_eq!(stored_activity_type("attempted_problem"), "attempted_problem");
    }

    #[test]
    fn recent_activity_renders_datetimes_in_the_published_format() {
        let formats = DateFormats::default();
        let presented = RecentActivity::from_row(&row("ACTIVE", 300, 1), &formats);
        assert_eq!(presented.interval_start, "2014-05-01T000000");
        assert_eq!(presented.activity_type, "any");
        assert_eq!(presented.count, 300);
    }

    #[test]
    fn pivot_groups_rows_by_interval() {
        let formats = DateFormats::default();
        let stream = vec![
            row("ACTIVE", 300, 1),
            row("ATTEMPTED_PROBLEM", 120, 1),
            row("PLAYED_VIDEO", 200, 8),
        ];

        let weeks = pivot_weekly(&stream, &formats);
        assert_eq!(weeks.len(), 2);

        assert_eq!(weeks[0].any, Some(300));
        assert_eq!(weeks[0].attempted_problem, Some(120));
        assert_eq!(weeks[0].played_video, None, "missing type stays null");

        assert_eq!(weeks[1].any, None);
        assert_eq!(weeks[1].played_video, Some(200));
        assert_eq!(weeks[1].interval_start, "2014-05-08T000000");
    }

    #[test]
    fn pivot_of_nothing_is_empty() {
        assert!(pivot_weekly(&[], &DateFormats::default()).is_empty());
    }
}
