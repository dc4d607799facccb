use crate::config::UploadSettings;
use crate::error::{ApiError, TransportError};
use crate::ingest::upload::TempUpload;
use crate::services::run_blocking;
use crate::AppPipeline;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use log::info;
use std::path::Path;

/// HTTP handler wrapper around the upload transport and the ingestion pipeline.
///
/// - On success: returns `200 OK` with the inserted row count as text.
/// - On failure: returns the status chosen by [`ApiError`] with a JSON message.
pub async fn process(
    payload: Multipart,
    pipeline: web::Data<AppPipeline>,
    settings: web::Data<UploadSettings>,
) -> Result<HttpResponse, ApiError> {
    let upload = receive_csv(payload, &settings).await?;
    info!(
        "Received '{}' ({} bytes)",
        upload.original_name(),
        upload.len()
    );

    let pipeline = pipeline.into_inner();
    let report = run_blocking(move || pipeline.ingest_upload(upload)).await?;

    Ok(HttpResponse::Ok().body(format!(
        "File processed: {} rows inserted.",
        report.inserted
    )))
}

/// Streams the `file` field of the form into a spooled temporary file.
///
/// Type and size are enforced here, before any row is parsed. If the client
/// goes away mid-upload or a limit is hit, the partial file is dropped and
/// therefore deleted.
async fn receive_csv(
    mut payload: Multipart,
    settings: &UploadSettings,
) -> Result<TempUpload, TransportError> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| TransportError::Interrupted(e.to_string()))?;
        let field_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        if field_name.as_deref() != Some("file") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        if filename.trim().is_empty() {
            return Err(TransportError::MissingFile);
        }

        let declared_csv = field
            .content_type()
            .is_some_and(|mime| mime.essence_str() == "text/csv");
        if !declared_csv && !has_csv_extension(&filename) {
            return Err(TransportError::NotCsv);
        }

        let mut upload = TempUpload::create_in(&settings.dir, filename)?;
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| TransportError::Interrupted(e.to_string()))?;
            if upload.len() + chunk.len() as u64 > settings.max_bytes {
                return Err(TransportError::TooLarge {
                    limit: settings.max_bytes,
                });
            }
            upload.write_chunk(&chunk)?;
        }
        upload.flush()?;
        return Ok(upload);
    }

    Err(TransportError::MissingFile)
}

fn has_csv_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
