use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned identifier of an upload batch.
pub type BatchId = i64;

/// Label given to the one-row batch created for a manually entered record.
pub const MANUAL_ENTRY_LABEL: &str = "manual-entry";

/// A group of records committed together by one ingestion event.
///
/// A batch is written once, in the same transaction as its records, and is
/// never modified afterwards. `total_rows` reflects the number of records
/// inserted at creation time; deleting a record later does not change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadBatch {
    pub id: BatchId,
    /// Original file name of the upload, or [`MANUAL_ENTRY_LABEL`].
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub total_rows: i64,
}
