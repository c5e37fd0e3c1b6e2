//! Search cluster configuration.

use std::env;

/// Index queried when `SEARCH_INDEX` is unset.
pub const DEFAULT_INDEX: &str = "learners";

/// Connection settings for the roster index, read from the environment.
///
/// `host` unset is a supported deployment mode: the server boots without a
/// search connection and the learner endpoints report the index unavailable.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub host: Option<String>,
    pub index: String,
    pub transport: Option<String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_region: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            host: None,
            index: DEFAULT_INDEX.to_string(),
            transport: None,
            aws_access_key_id: None,
            aws_secret_access_key: None,
            aws_region: None,
        }
    }
}

impl SearchConfig {
    /// Load configuration from environment variables. Empty values count as
    /// unset so a blank line in an env file does not half-configure the
    /// client.
    pub fn from_env() -> Self {
        Self {
            host: non_empty(env::var("SEARCH_HOST").ok()),
            index: non_empty(env::var("SEARCH_INDEX").ok())
                .unwrap_or_else(|| DEFAULT_INDEX.to_string()),
            transport: non_empty(env::var("SEARCH_TRANSPORT").ok()),
            aws_access_key_id: non_empty(env::var("SEARCH_AWS_ACCESS_KEY_ID").ok()),
            aws_secret_access_key: non_empty(env::var("SEARCH_AWS_SECRET_ACCESS_KEY").ok()),
            aws_region: non_empty(env::var("SEARCH_AWS_REGION").ok()),
        }
    }

    /// Whether a search host is configured at all.
    pub fn is_configured(&self) -> bool {
        self.host.is_some()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_unconfigured_with_the_default_index() {
        let config = SearchConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.index, "learners");
    }

    #[test]
    fn blank_strings_count_as_unset() {
        assert_eq!(non_empty(Some("".to_string())), None);
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(Some("x".to_string())), Some("x".to_string()));
        assert_eq!(non_empty(None), None);
    }
}
