//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async read methods that
//! accept `&PgPool` as the first argument. All queries are read-only.

pub mod activity_repo;
pub mod engagement_repo;
pub mod enrollment_repo;
pub mod problems_repo;
pub mod video_repo;

pub use activity_repo::ActivityRepo;
pub use engagement_repo::EngagementRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use problems_repo::ProblemsRepo;
pub use video_repo::VideoRepo;
