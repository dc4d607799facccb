//! Persistence of upload batches and their records.
//!
//! The ingestion pipeline only sees [`BatchStore`]: a handle that hands out a
//! [`BatchWriter`] for the duration of one transaction. Batch creation and the
//! bulk insert of its records therefore commit or roll back together, so a
//! failure can never leave a batch referencing a subset of its rows.

mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::StoreError;
use common::model::batch::BatchId;
use common::model::record::NewRecord;

/// Write operations available inside a store transaction.
pub trait BatchWriter {
    /// Creates a new batch labeled with `label` and returns its identifier.
    fn create_batch(&mut self, label: &str) -> Result<BatchId, StoreError>;

    /// Inserts every row under `batch_id` and returns how many were inserted.
    /// If the store rejects any row, none of them are kept.
    fn bulk_insert_records(
        &mut self,
        batch_id: BatchId,
        rows: &[NewRecord],
    ) -> Result<usize, StoreError>;
}

/// A shared storage handle that runs units of work atomically.
pub trait BatchStore: Send + Sync {
    /// Runs `work` inside one transaction.
    ///
    /// The transaction commits when `work` returns `Ok` and rolls back when it
    /// returns `Err` (or panics).
    fn transaction<T, F>(&self, work: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut dyn BatchWriter) -> Result<T, StoreError>;
}
