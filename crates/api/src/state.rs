use std::sync::Arc;

use insights_search::RosterSearch;

use crate::config::ApiConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: insights_db::DbPool,
    /// Server configuration (render formats, LMS account base URL).
    pub config: Arc<ApiConfig>,
    /// Roster search client. `None` when no search host is configured, in
    /// which case roster-backed endpoints report the index unavailable.
    pub roster: Option<Arc<dyn RosterSearch>>,
}
