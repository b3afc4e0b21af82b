//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod feedback_repo;
pub mod lookup_repo;
pub mod project_repo;
pub mod submission_repo;
pub mod video_repo;

pub use feedback_repo::FeedbackRepo;
pub use lookup_repo::{CategoryRepo, CounselorRepo};
pub use project_repo::ProjectRepo;
pub use submission_repo::SubmissionRepo;
pub use video_repo::{TechnicalSpecRepo, VideoRepo};
