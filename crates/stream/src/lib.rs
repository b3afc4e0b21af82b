//! Client for the external streaming provider.
//!
//! Covers the four provider surfaces this backend touches: resumable
//! direct-upload session creation, server-side remote-copy ingestion,
//! best-effort view analytics, and caption management. Raw media bytes
//! never pass through this crate — clients stream straight to the
//! session endpoint the provider hands back.

pub mod client;
pub mod config;
pub mod metadata;
pub mod urls;

pub use client::{StreamClient, StreamError, UploadSessionOptions};
pub use config::StreamConfig;
pub use urls::DeliveryUrls;
