//! Search-index client for the learner roster.
//!
//! The reporting pipeline maintains an Elasticsearch-compatible index of
//! per-course learner documents; this crate wraps it behind the
//! [`roster::RosterSearch`] trait so the HTTP layer never talks to the wire
//! format directly. Includes the transport registry (plain HTTP or AWS
//! SigV4-signed requests) and the process-global default connection.

use insights_core::error::CoreError;

pub mod config;
pub mod connection;
pub mod query;
pub mod roster;
pub mod sigv4;
pub mod transport;

pub use config::SearchConfig;
pub use query::RosterParams;
pub use roster::{CourseMetadataAggregates, HttpRosterSearch, RosterEntry, RosterPage, RosterSearch};
pub use transport::{Transport, TransportKind};

/// Errors from the search client layer.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The search cluster returned a non-2xx status code.
    #[error("search API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A request body could not be encoded.
    #[error("failed to encode search request: {0}")]
    Encode(#[from] serde_json::Error),

    /// The response parsed as JSON but not in the shape the index contract
    /// promises.
    #[error("search response not in the expected shape: {0}")]
    Malformed(&'static str),

    /// A stored document violates the index contract (e.g. a learner
    /// document with no username).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The client is misconfigured; raised at startup, never mid-request.
    #[error("{0}")]
    Config(String),
}
