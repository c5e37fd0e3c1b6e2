//! Process-wide default roster connection.
//!
//! Built once at startup from [`SearchConfig`] and shared by every request.
//! An unconfigured host is a supported mode, not an error: the server runs
//! without learner data and the HTTP layer reports the index unavailable.

use std::sync::{Arc, OnceLock};

use crate::config::SearchConfig;
use crate::roster::HttpRosterSearch;
use crate::transport::Transport;
use crate::SearchError;

static DEFAULT_CONNECTION: OnceLock<Arc<HttpRosterSearch>> = OnceLock::new();

/// Build and memoize the process-wide roster client.
///
/// Returns `Ok(None)` when no search host is configured. Subsequent calls
/// return the already-built client regardless of the config passed; the
/// connection is fixed for the life of the process.
pub fn create_default(
    config: &SearchConfig,
) -> Result<Option<Arc<HttpRosterSearch>>, SearchError> {
    if let Some(existing) = DEFAULT_CONNECTION.get() {
        return Ok(Some(Arc::clone(existing)));
    }

    let Some(host) = config.host.as_deref() else {
        return Ok(None);
    };

    let transport = Transport::build(config)?;
    let client = Arc::new(HttpRosterSearch::new(host, &config.index, transport)?);
    let stored = DEFAULT_CONNECTION.get_or_init(|| Arc::clone(&client));
    Ok(Some(Arc::clone(stored)))
}
