//! Domain error type shared across the workspace.
//!
//! Every variant that can surface to an API client carries the stable
//! `error_code` string consumers match on, alongside a human-readable
//! developer message (the `Display` impl). The HTTP layer maps variants to
//! status codes; this crate stays transport-agnostic.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// A learner endpoint was called without a `course_id` parameter.
    #[error("Course id/key not specified.")]
    CourseNotSpecified,

    /// The supplied course identifier matches neither the legacy
    /// `org/course/run` form nor the `course-v1:org+course+run` form.
    #[error("Course id/key {course_id} malformed.")]
    CourseKeyMalformed { course_id: String },

    /// A query parameter had an unusable value or an illegal combination
    /// of parameters was supplied.
    #[error("{0}")]
    ParameterValue(String),

    /// No roster entry exists for the (username, course) pair.
    #[error("Learner {username} not found for course {course_id}.")]
    LearnerNotFound { username: String, course_id: String },

    /// No engagement timeline rows exist for the (username, course) pair.
    #[error("Learner {username} not found for course {course_id}.")]
    TimelineNotFound { username: String, course_id: String },

    /// An input row was missing a field the serializer requires. This is a
    /// data-shape defect in the upstream store, not a caller mistake.
    #[error("Required field {field} missing from input row.")]
    ReportFieldMissing { field: &'static str },

    /// Catch-all for unexpected internal failures.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Stable machine-readable code for the client-facing error body.
    pub fn error_code(&self) -> &'static str {
        match self {
            CoreError::CourseNotSpecified => "course_not_specified",
            CoreError::CourseKeyMalformed { .. } => "course_key_malformed",
            CoreError::ParameterValue(_) => "illegal_parameter_values",
            CoreError::LearnerNotFound { .. } => "no_learner_for_course",
            CoreError::TimelineNotFound { .. } => "no_learner_engagement_timeline",
            CoreError::ReportFieldMissing { .. } => "report_field_missing",
            CoreError::Internal(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_published_wire_contract() {
        assert_eq!(
            CoreError::CourseNotSpecified.to_string(),
            "Course id/key not specified."
        );
        assert_eq!(
            CoreError::CourseKeyMalformed {
                course_id: "malformed-course-id".into()
            }
            .to_string(),
            "Course id/key malformed-course-id malformed."
        );
        assert_eq!(
            CoreError::LearnerNotFound {
                username: "a_user".into(),
                course_id: "edX/DemoX/Demo_Course".into()
            }
            .to_string(),
            "Learner a_user not found for course edX/DemoX/Demo_Course."
        );
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(
            CoreError::CourseNotSpecified.error_code(),
            "course_not_specified"
        );
        assert_eq!(
            CoreError::ParameterValue("page".into()).error_code(),
            "illegal_parameter_values"
        );
        assert_eq!(
            CoreError::ReportFieldMissing { field: "module_id" }.error_code(),
            "report_field_missing"
        );
    }
}
