/// Inscription ids are PostgreSQL BIGSERIAL values.
pub type DbId = i64;

/// All timestamps are UTC, set by the persistence layer.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
