use crate::model::batch::BatchId;
use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a person record.
pub type RecordId = i64;

/// A persisted person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub age: i64,
    pub city: String,
    /// The batch that created this record.
    pub upload_id: BatchId,
}

/// A validated, normalized record that has not been stored yet.
///
/// Instances are only produced by the backend validator, so `name` and
/// `city` are trimmed and non-empty and `age` is strictly positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub name: String,
    pub age: i64,
    pub city: String,
}
