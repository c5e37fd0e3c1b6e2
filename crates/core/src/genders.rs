//! Gender bucket constants for the enrollment-by-gender breakdown.

pub const FEMALE: &str = "female";
pub const MALE: &str = "male";
pub const OTHER: &str = "other";
pub const UNKNOWN: &str = "unknown";

/// Buckets exposed by the API, in response field order. Rows whose gender
/// value is absent or unrecognized are counted under [`UNKNOWN`].
pub const ALL: &[&str] = &[FEMALE, MALE, OTHER, UNKNOWN];
