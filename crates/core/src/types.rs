/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (no time component) as stored in the fact tables.
pub type Day = chrono::NaiveDate;
