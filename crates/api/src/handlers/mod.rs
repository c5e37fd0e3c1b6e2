//! Request handlers, one module per routing prefix. Service-level views
//! (status, health, auth probe) live with their routes in `routes::service`.

pub mod courses;
pub mod learners;
pub mod problems;
pub mod videos;
