//! CSV upload endpoint and read access to upload batches.
//!
//! The provided routes are:
//! - `POST /uploads`: multipart/form-data upload with a single `file` field.
//!   The file is spooled to the upload directory, checked for type and size,
//!   and handed to the ingestion pipeline. The whole file is committed as one
//!   batch, or nothing is stored if any row is invalid. Responds with the
//!   number of inserted rows as plain text.
//!
//! - `GET /uploads`: every batch (file uploads and manual entries), newest first.
//!
//! - `GET /uploads/{id}/records`: the records created by one batch.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod list;
mod records;
mod upload;

const API_PATH: &str = "/uploads";

/// Configures and returns the Actix scope for upload routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        // Route to upload and ingest a CSV file.
        .route("", post().to(upload::process))
        // Route to list upload batches.
        .route("", get().to(list::process))
        // Route to list the records of one batch.
        .route("/{id}/records", get().to(records::process))
}
