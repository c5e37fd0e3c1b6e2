//! Shared field-shaping helpers used by every serializer.
//!
//! Defaults are applied here, in one greppable place, so the substitution
//! policy stays uniform: a declared default replaces *absent* values only,
//! never real zeros or empty-but-present values the API preserves.

use crate::error::CoreError;

/// Substitute `default` for an absent value. Present values pass through
/// untouched, including zero.
pub fn value_or_default<T>(value: Option<T>, default: T) -> T {
    value.unwrap_or(default)
}

/// Extract a field the serializer cannot proceed without. Absence fails the
/// whole serialization, identifying the field.
pub fn require_field<T>(value: Option<T>, field: &'static str) -> Result<T, CoreError> {
    value.ok_or(CoreError::ReportFieldMissing { field })
}

/// Normalize the pipeline's empty-string sentinel to null. Cohort values
/// arrive as `""` for learners outside any cohort.
pub fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_replace_absent_values_only() {
        assert_eq!(value_or_default(None, 0), 0);
        assert_eq!(value_or_default(Some(0), 7), 0);
        assert_eq!(value_or_default(Some(3), 0), 3);
    }

    #[test]
    fn missing_required_fields_name_the_field() {
        let err = require_field::<i64>(None, "module_id").unwrap_err();
        assert_eq!(
            err,
            CoreError::ReportFieldMissing { field: "module_id" }
        );
        assert_eq!(require_field(Some(5), "count"), Ok(5));
    }

    #[test]
    fn empty_strings_normalize_to_null() {
        assert_eq!(none_if_empty(Some(String::new())), None);
        assert_eq!(none_if_empty(None), None);
        assert_eq!(
            none_if_empty(Some("alpha".into())),
            Some("alpha".to_string())
        );
    }
}
