//! Error types for each layer of the server and their HTTP mapping.
//!
//! Storage and parser failures never reach the client verbatim: [`ApiError`]
//! turns every failure class into a status code and a short JSON message, and
//! logs the underlying cause for server-side failures.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde_json::json;
use thiserror::Error;

/// Failures reported by the batch store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("storage connection lock poisoned")]
    Poisoned,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of one ingestion run.
#[derive(Debug, Error)]
pub enum IngestError {
    /// CSV framing could not be decoded (or the stream broke mid-read).
    #[error("malformed CSV: {0}")]
    StreamMalformed(#[from] csv::Error),

    #[error("CSV header is missing the `{0}` column")]
    MissingColumn(&'static str),

    /// At least one row failed validation; nothing was written.
    #[error("{invalid_rows} row(s) failed validation")]
    ValidationFailed { invalid_rows: usize },

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("could not read the uploaded file: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejections raised by the upload transport before ingestion starts.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("No file was uploaded.")]
    MissingFile,

    #[error("Only CSV files are accepted.")]
    NotCsv,

    #[error("The file exceeds the {limit} byte upload limit.")]
    TooLarge { limit: u64 },

    #[error("upload interrupted: {0}")]
    Interrupted(String),

    #[error("could not store the upload: {0}")]
    TempFile(#[from] std::io::Error),
}

/// Error returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid record data")]
    InvalidRecord,

    #[error("record not found")]
    NotFound,

    #[error("background task failed: {0}")]
    Blocking(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Message shown to the client. Server-side causes stay in the log.
    fn public_message(&self) -> String {
        match self {
            ApiError::Transport(TransportError::TempFile(_)) => {
                "Error processing the file.".to_string()
            }
            ApiError::Transport(e) => e.to_string(),
            ApiError::Ingest(IngestError::ValidationFailed { .. }) => {
                "Invalid data in one or more rows. Check the CSV.".to_string()
            }
            ApiError::Ingest(IngestError::MissingColumn(column)) => {
                format!("The CSV header must include a `{}` column.", column)
            }
            ApiError::Ingest(IngestError::StreamMalformed(e)) if !e.is_io_error() => {
                "The file is not valid CSV.".to_string()
            }
            ApiError::Ingest(IngestError::Storage(_)) => {
                "Error inserting data into the database.".to_string()
            }
            ApiError::Ingest(_) => "Error processing the file.".to_string(),
            ApiError::Store(_) => "A database error occurred.".to_string(),
            ApiError::InvalidRecord => "Invalid data".to_string(),
            ApiError::NotFound => "Record not found".to_string(),
            ApiError::Blocking(_) | ApiError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Transport(TransportError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Transport(TransportError::TempFile(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Transport(_) => StatusCode::BAD_REQUEST,
            ApiError::Ingest(IngestError::StreamMalformed(e)) if e.is_io_error() => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Ingest(
                IngestError::StreamMalformed(_)
                | IngestError::MissingColumn(_)
                | IngestError::ValidationFailed { .. },
            ) => StatusCode::BAD_REQUEST,
            ApiError::Ingest(IngestError::Storage(_) | IngestError::Io(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidRecord => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Blocking(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        }
        HttpResponse::build(status).json(json!({ "error": self.public_message() }))
    }
}
