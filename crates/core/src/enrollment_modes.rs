//! Well-known enrollment mode constants.
//!
//! These are the canonical mode names used in the `course_enrollment_modes`
//! fact table and the per-mode columns of the enrollment breakdown response.

pub const AUDIT: &str = "audit";
pub const CREDIT: &str = "credit";
pub const HONOR: &str = "honor";
pub const PROFESSIONAL: &str = "professional";
pub const VERIFIED: &str = "verified";

/// Enrollment modes recognized by the API, in response field order. Every
/// mode in this list is always present in a mode-breakdown row, defaulting
/// to 0 when the pipeline produced no count for it.
pub const ALL: &[&str] = &[AUDIT, CREDIT, HONOR, PROFESSIONAL, VERIFIED];
