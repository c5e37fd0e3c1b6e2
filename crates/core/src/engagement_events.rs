//! Engagement metric and event constants.
//!
//! The pipeline stores raw per-module engagement counters as
//! `(entity_type, event)` pairs; the API reports them under flat metric
//! names. [`metric_for`] is the single place that mapping lives.

// ---------------------------------------------------------------------------
// Reported metric names
// ---------------------------------------------------------------------------

pub const PROBLEMS_ATTEMPTED: &str = "problems_attempted";
pub const PROBLEMS_COMPLETED: &str = "problems_completed";
pub const DISCUSSION_CONTRIBUTIONS: &str = "discussion_contributions";
pub const VIDEOS_VIEWED: &str = "videos_viewed";
pub const PROBLEM_ATTEMPTS_PER_COMPLETED: &str = "problem_attempts_per_completed";

/// Countable metrics: an absent value serializes as 0, never null.
pub const COUNTABLE_EVENTS: &[&str] = &[
    PROBLEMS_ATTEMPTED,
    PROBLEMS_COMPLETED,
    DISCUSSION_CONTRIBUTIONS,
    VIDEOS_VIEWED,
];

/// Every metric the engagement range shaper reports, including the
/// attempts-per-completed ratio (which, unlike the countable metrics,
/// preserves null when absent).
pub const EVENTS: &[&str] = &[
    PROBLEMS_ATTEMPTED,
    PROBLEMS_COMPLETED,
    DISCUSSION_CONTRIBUTIONS,
    VIDEOS_VIEWED,
    PROBLEM_ATTEMPTS_PER_COMPLETED,
];

// ---------------------------------------------------------------------------
// Raw pipeline vocabulary
// ---------------------------------------------------------------------------

pub const ENTITY_PROBLEM: &str = "problem";
pub const ENTITY_VIDEO: &str = "video";
pub const ENTITY_DISCUSSION: &str = "discussion";

pub const EVENT_ATTEMPTED: &str = "attempted";
pub const EVENT_COMPLETED: &str = "completed";
pub const EVENT_VIEWED: &str = "viewed";
pub const EVENT_CONTRIBUTED: &str = "contributed";

/// Map a raw `(entity_type, event)` pair from the `module_engagement` table
/// to the metric name it is reported under. Unrecognized pairs return
/// `None` and are dropped from timelines.
pub fn metric_for(entity_type: &str, event: &str) -> Option<&'static str> {
    match (entity_type, event) {
        (ENTITY_PROBLEM, EVENT_ATTEMPTED) => Some(PROBLEMS_ATTEMPTED),
        (ENTITY_PROBLEM, EVENT_COMPLETED) => Some(PROBLEMS_COMPLETED),
        (ENTITY_DISCUSSION, EVENT_CONTRIBUTED) => Some(DISCUSSION_CONTRIBUTIONS),
        (ENTITY_VIDEO, EVENT_VIEWED) => Some(VIDEOS_VIEWED),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_pairs_map_to_reported_metrics() {
        assert_eq!(metric_for("problem", "attempted"), Some(PROBLEMS_ATTEMPTED));
        assert_eq!(metric_for("problem", "completed"), Some(PROBLEMS_COMPLETED));
        assert_eq!(
            metric_for("discussion", "contributed"),
            Some(DISCUSSION_CONTRIBUTIONS)
        );
        assert_eq!(metric_for("video", "viewed"), Some(VIDEOS_VIEWED));
    }

    #[test]
    fn unknown_pairs_are_dropped() {
        assert_eq!(metric_for("problem", "viewed"), None);
        assert_eq!(metric_for("forum", "posted"), None);
    }

    #[test]
    fn countable_events_are_a_prefix_of_all_events() {
        assert_eq!(&EVENTS[..COUNTABLE_EVENTS.len()], COUNTABLE_EVENTS);
        assert!(EVENTS.contains(&PROBLEM_ATTEMPTS_PER_COMPLETED));
    }
}
