use serde::Deserialize;

/// Request payload for creating or updating a single record.
/// Fields are validated with the same rules as CSV rows.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordRequest {
    pub name: String,
    pub age: i64,
    pub city: String,
}
