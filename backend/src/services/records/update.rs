use crate::error::ApiError;
use crate::ingest::validator;
use crate::services::run_blocking;
use crate::store::SqliteStore;
use actix_web::{web, HttpResponse};
use common::model::record::RecordId;
use common::requests::RecordRequest;
use serde_json::json;

pub(crate) async fn process(
    id: web::Path<RecordId>,
    store: web::Data<SqliteStore>,
    payload: web::Json<RecordRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let RecordRequest { name, age, city } = payload.into_inner();
    let row = validator::normalize(&name, age, &city).ok_or(ApiError::InvalidRecord)?;

    let store = store.get_ref().clone();
    let record = run_blocking(move || store.update_record(id, &row))
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Record updated",
        "record": record,
    })))
}
