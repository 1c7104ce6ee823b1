/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (launch dates, due dates, event windows) carry no time
/// component.
pub type Date = chrono::NaiveDate;
