//! HTTP handlers, grouped by resource.

pub mod feedback;
pub mod submissions;
pub mod uploads;
pub mod videos;
pub mod webhooks;
