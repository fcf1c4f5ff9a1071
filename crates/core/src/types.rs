/// All primary keys are UUIDs generated by PostgreSQL (`gen_random_uuid()`).
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// 1-based position of an item among its siblings in a group.
pub type SequenceNumber = i32;
