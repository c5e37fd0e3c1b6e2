//! Row structs for the fact tables.
//!
//! Each submodule holds the `FromRow` structs for one fact family, matching
//! the table columns minus the synthetic `id` (the pipeline reloads tables
//! wholesale, so row ids are not stable and are never exposed).

pub mod activity;
pub mod engagement;
pub mod enrollment;
pub mod problems;
pub mod videos;
