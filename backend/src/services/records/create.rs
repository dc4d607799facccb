use crate::error::ApiError;
use crate::ingest::validator;
use crate::services::run_blocking;
use crate::AppPipeline;
use actix_web::{web, HttpResponse};
use common::model::record::{NewRecord, Record};
use common::requests::RecordRequest;
use serde_json::json;

/// Creates one record under a fresh `manual-entry` batch.
///
/// - `201 Created` with the stored record.
/// - `400 Bad Request` if a field fails validation.
pub(crate) async fn process(
    pipeline: web::Data<AppPipeline>,
    payload: web::Json<RecordRequest>,
) -> Result<HttpResponse, ApiError> {
    let RecordRequest { name, age, city } = payload.into_inner();
    let row = validator::normalize(&name, age, &city).ok_or(ApiError::InvalidRecord)?;

    let pipeline = pipeline.into_inner();
    let record = run_blocking(move || create_record(&pipeline, row)).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Record created",
        "record": record,
    })))
}

fn create_record(pipeline: &AppPipeline, row: NewRecord) -> Result<Record, ApiError> {
    let report = pipeline.ingest_single(row)?;
    pipeline
        .store()
        .records_for_batch(report.batch_id)?
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::Internal(format!("batch {} has no record", report.batch_id)))
}
