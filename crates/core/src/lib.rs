//! Core domain logic for the insights learning-analytics API.
//!
//! This crate has no internal dependencies so it can be used by the
//! API/repository layer, the search client, and any future CLI or worker
//! tooling. Everything here is a pure, synchronous projection: constants,
//! validation, date rendering, and the engagement range shaper.

pub mod country;
pub mod course_key;
pub mod engagement_events;
pub mod enrollment_modes;
pub mod error;
pub mod formats;
pub mod genders;
pub mod learner;
pub mod ranges;
pub mod serialize;
pub mod types;
