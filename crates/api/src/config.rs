use insights_core::formats::{DateFormats, DEFAULT_DATE_FORMAT, DEFAULT_DATETIME_FORMAT};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables. Search-cluster
/// settings live in `insights_search::SearchConfig`, loaded separately.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8100`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Render formats for every date/datetime field in a response body.
    pub formats: DateFormats,
    /// Base URL joined with a username to build learner `account_url`
    /// values. Unset renders `account_url` as null.
    pub lms_user_account_base_url: Option<String>,
}

impl ApiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                   |
    /// |-----------------------------|---------------------------|
    /// | `HOST`                      | `0.0.0.0`                 |
    /// | `PORT`                      | `8100`                    |
    /// | `CORS_ORIGINS`              | `http://localhost:8110`   |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                      |
    /// | `DATE_FORMAT`               | `%Y-%m-%d`                |
    /// | `DATETIME_FORMAT`           | `%Y-%m-%dT%H%M%S`         |
    /// | `LMS_USER_ACCOUNT_BASE_URL` | unset                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8100".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8110".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let formats = DateFormats {
            date: std::env::var("DATE_FORMAT").unwrap_or_else(|_| DEFAULT_DATE_FORMAT.into()),
            datetime: std::env::var("DATETIME_FORMAT")
                .unwrap_or_else(|_| DEFAULT_DATETIME_FORMAT.into()),
        };
        // Consumers parse the rendered dates, so a broken format string must
        // stop the boot, not surface mid-request.
        formats
            .validate()
            .expect("DATE_FORMAT/DATETIME_FORMAT must be valid strftime strings");

        let lms_user_account_base_url = std::env::var("LMS_USER_ACCOUNT_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            formats,
            lms_user_account_base_url,
        }
    }
}
