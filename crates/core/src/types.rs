/// All catalog entities are keyed by UUID v4.
pub type Id = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
