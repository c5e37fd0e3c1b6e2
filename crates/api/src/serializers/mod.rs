//! Wire-format projections of stored rows.
//!
//! One module per fact family. Every serializer is a `Serialize` struct plus
//! a constructor that is a pure projection of its input row(s): renames,
//! declared defaults, and date rendering happen here and nowhere else.
//! Struct field order is the published JSON key order.

pub mod activity;
pub mod enrollment;
pub mod learners;
pub mod problems;
pub mod videos;
