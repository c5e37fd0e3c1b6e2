//! Course identifier validation.
//!
//! Two forms are accepted, both three non-empty segments:
//!
//! - legacy slash form: `edX/DemoX/Demo_Course`
//! - new-style form:    `course-v1:edX+DemoX+Demo_Course`
//!
//! The final segment may itself contain `+` (the run segment of new-style
//! keys), which is why the pattern treats it differently from the first two.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CoreError;

static COURSE_ID_PATTERN: OnceLock<Regex> = OnceLock::new();

fn pattern() -> &'static Regex {
    COURSE_ID_PATTERN.get_or_init(|| {
        Regex::new(r"^[^/+]+[/+][^/+]+[/+][^/]+$").expect("course id pattern is valid")
    })
}

/// Check whether a string is a structurally valid course identifier.
pub fn is_valid_course_id(course_id: &str) -> bool {
    pattern().is_match(course_id)
}

/// Validate the `course_id` query parameter of a learner route.
///
/// Missing or empty values are reported as `course_not_specified`;
/// present-but-malformed values as `course_key_malformed`.
pub fn validate_course_id(course_id: Option<&str>) -> Result<String, CoreError> {
    let course_id = match course_id {
        Some(value) if !value.is_empty() => value,
        _ => return Err(CoreError::CourseNotSpecified),
    };

    if is_valid_course_id(course_id) {
        Ok(course_id.to_string())
    } else {
        Err(CoreError::CourseKeyMalformed {
            course_id: course_id.to_string(),
        })
    }
}
