//! Insights API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! serializers) so integration tests and the binary entrypoint can both
//! access them.

pub mod config;
pub mod consolidation;
pub mod error;
pub mod handlers;
pub mod pagination;
pub mod routes;
pub mod serializers;
pub mod state;
