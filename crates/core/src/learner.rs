//! Learner roster constants: segment names, sortable fields, paging caps.

/// Segment labels the pipeline assigns to roster entries.
pub const SEGMENT_HIGHLY_ENGAGED: &str = "highly_engaged";
pub const SEGMENT_DISENGAGING: &str = "disengaging";
pub const SEGMENT_STRUGGLING: &str = "struggling";
pub const SEGMENT_INACTIVE: &str = "inactive";
pub const SEGMENT_UNENROLLED: &str = "unenrolled";

pub const SEGMENTS: &[&str] = &[
    SEGMENT_HIGHLY_ENGAGED,
    SEGMENT_DISENGAGING,
    SEGMENT_STRUGGLING,
    SEGMENT_INACTIVE,
    SEGMENT_UNENROLLED,
];

/// Fields the learner list may be ordered by. Anything else in `order_by`
/// is an illegal parameter value.
pub const ORDER_BY_FIELDS: &[&str] = &[
    "username",
    "email",
    "discussion_contributions",
    "problems_attempted",
    "problems_completed",
    "problem_attempts_per_completed",
    "videos_viewed",
];

/// Default roster ordering when `order_by` is not supplied.
pub const DEFAULT_ORDER_BY: &str = "username";

pub const SORT_ASCENDING: &str = "asc";
pub const SORT_DESCENDING: &str = "desc";

/// Learner list page size bounds. Requests outside `1..=MAX_PAGE_SIZE` are
/// rejected rather than clamped.
pub const DEFAULT_PAGE_SIZE: u32 = 25;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Check whether a field name is sortable.
pub fn is_sortable_field(field: &str) -> bool {
    ORDER_BY_FIELDS.contains(&field)
}
