//! Domain logic for the Hamkkebom video pipeline.
//!
//! This crate has no I/O dependencies (no DB, no HTTP). It holds the
//! lifecycle enums, credential signing/verification, the legacy-filename
//! parser, storage-sync planning, submission versioning rules, and the
//! review-session transport model. The `db`, `stream`, `api`, and `worker`
//! crates build on these types.

pub mod annotation;
pub mod error;
pub mod feedback;
pub mod filename;
pub mod reconcile;
pub mod review;
pub mod roles;
pub mod signing;
pub mod submission;
pub mod types;
pub mod video;
