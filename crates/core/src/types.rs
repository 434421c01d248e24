/// All entity primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Lookup tables (species, statuses, cities, ...) use SMALLSERIAL keys.
pub type LookupId = i16;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
