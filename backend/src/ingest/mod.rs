//! All-or-nothing CSV ingestion.
//!
//! An upload is read once from start to end. Every row goes through the
//! validator; if any row fails, nothing is written. Otherwise a new batch and
//! all of its records are written in a single store transaction. The spooled
//! upload is deleted on every exit path.
//!
//! Manually entered records use the same path as a one-row batch, so every
//! record always belongs to a batch.

pub mod parser;
pub mod upload;
pub mod validator;

use crate::error::IngestError;
use crate::store::BatchStore;
use common::model::batch::{BatchId, MANUAL_ENTRY_LABEL};
use common::model::record::NewRecord;
use log::{info, warn};
use parser::RowReader;
use std::io::Read;
use upload::TempUpload;

/// Outcome of a committed ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub batch_id: BatchId,
    pub inserted: usize,
}

pub struct IngestPipeline<S> {
    store: S,
}

impl<S: BatchStore> IngestPipeline<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ingests a spooled upload and deletes it afterwards, whatever the outcome.
    pub fn ingest_upload(&self, upload: TempUpload) -> Result<IngestReport, IngestError> {
        let outcome = upload
            .open_reader()
            .map_err(IngestError::from)
            .and_then(|file| self.ingest(file, upload.original_name()));

        let path = upload.path().to_path_buf();
        if let Err(e) = upload.release() {
            warn!(
                "Could not remove temporary upload {}: {}",
                path.display(),
                e
            );
        }
        outcome
    }

    /// Reads every row of `source` and commits them as one batch labeled `label`.
    ///
    /// A header-only file is accepted and produces an empty batch.
    pub fn ingest<R: Read>(&self, source: R, label: &str) -> Result<IngestReport, IngestError> {
        let rows = collect_valid_rows(source).inspect_err(|e| {
            warn!("Rejected upload '{}': {}", label, e);
        })?;
        self.commit(label, &rows)
    }

    /// Stores one validated record under its own `manual-entry` batch.
    pub fn ingest_single(&self, row: NewRecord) -> Result<IngestReport, IngestError> {
        self.commit(MANUAL_ENTRY_LABEL, std::slice::from_ref(&row))
    }

    fn commit(&self, label: &str, rows: &[NewRecord]) -> Result<IngestReport, IngestError> {
        let report = self.store.transaction(|writer| {
            let batch_id = writer.create_batch(label)?;
            let inserted = writer.bulk_insert_records(batch_id, rows)?;
            Ok(IngestReport { batch_id, inserted })
        })?;
        info!(
            "Committed batch {} ('{}') with {} record(s)",
            report.batch_id, label, report.inserted
        );
        Ok(report)
    }
}

/// Drains the whole stream. Rows are kept only while every row so far is valid.
fn collect_valid_rows<R: Read>(source: R) -> Result<Vec<NewRecord>, IngestError> {
    let mut rows = Vec::new();
    let mut invalid_rows = 0usize;

    for raw in RowReader::new(source)? {
        match validator::validate(&raw?) {
            Some(row) if invalid_rows == 0 => rows.push(row),
            Some(_) => {}
            None => {
                invalid_rows += 1;
                rows.clear();
            }
        }
    }

    if invalid_rows > 0 {
        return Err(IngestError::ValidationFailed { invalid_rows });
    }
    Ok(rows)
}
