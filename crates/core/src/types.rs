/// Record identifiers are assigned by the Data Service as UUIDs.
pub type RecordId = uuid::Uuid;

/// All timestamps are UTC, assigned by the Data Service clock.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
