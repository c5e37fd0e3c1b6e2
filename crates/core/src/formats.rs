//! Process-wide date rendering.
//!
//! All date and datetime fields in API responses render through the two
//! format strings held here. Consumers parse these strings, so the defaults
//! must be reproduced bit-exactly: `2014-05-29` and `2014-05-29T190735`.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Default render format for date-only fields.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default render format for datetime fields. Note the absence of colons in
/// the time component; this matches the format the original reporting
/// pipeline published and downstream dashboards parse.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H%M%S";

/// The two strftime-style format strings used for every rendered date.
#[derive(Debug, Clone)]
pub struct DateFormats {
    pub date: String,
    pub datetime: String,
}

impl Default for DateFormats {
    fn default() -> Self {
        Self {
            date: DEFAULT_DATE_FORMAT.to_string(),
            datetime: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}

impl DateFormats {
    /// Render a date-only field.
    pub fn format_date(&self, day: NaiveDate) -> String {
        day.format(&self.date).to_string()
    }

    /// Render a datetime field.
    pub fn format_datetime(&self, at: Timestamp) -> String {
        at.format(&self.datetime).to_string()
    }

    /// Parse a `start_date`/`end_date` query parameter. Date-only input is
    /// taken as midnight; datetime input is accepted in the same format the
    /// API renders. Anything else is an illegal parameter value.
    pub fn parse_date_or_datetime(&self, name: &str, value: &str) -> Result<NaiveDateTime, CoreError> {
        if let Ok(day) = NaiveDate::parse_from_str(value, &self.date) {
            if let Some(at_midnight) = day.and_hms_opt(0, 0, 0) {
                return Ok(at_midnight);
            }
        }
        NaiveDateTime::parse_from_str(value, &self.datetime).map_err(|_| {
            CoreError::ParameterValue(format!(
                "{name} is not a valid date or datetime: {value}"
            ))
        })
    }

    /// Probe both format strings against a fixed date so a misconfigured
    /// format fails at startup instead of panicking mid-request. chrono only
    /// reports bad specifiers when a formatted value is rendered.
    pub fn validate(&self) -> Result<(), CoreError> {
        use std::fmt::Write;

        let probe_day = NaiveDate::from_ymd_opt(2000, 1, 1).expect("probe date is valid");
        let probe_at = probe_day.and_hms_opt(0, 0, 0).expect("probe time is valid");

        let mut rendered = String::new();
        write!(rendered, "{}", probe_day.format(&self.date))
            .map_err(|_| CoreError::Internal(format!("invalid DATE_FORMAT: {}", self.date)))?;
        rendered.clear();
        write!(rendered, "{}", probe_at.format(&self.datetime)).map_err(|_| {
            CoreError::Internal(format!("invalid DATETIME_FORMAT: {}", self.datetime))
        })?;
        Ok(())
    }
}
