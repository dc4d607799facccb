use crate::error::ApiError;
use crate::services::run_blocking;
use crate::store::SqliteStore;
use actix_web::{web, HttpResponse};
use common::model::record::RecordId;
use log::info;
use serde_json::json;

pub(crate) async fn process(
    id: web::Path<RecordId>,
    store: web::Data<SqliteStore>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let store = store.get_ref().clone();
    let record = run_blocking(move || store.delete_record(id))
        .await?
        .ok_or(ApiError::NotFound)?;
    info!("Deleted record {} from batch {}", record.id, record.upload_id);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Record deleted",
        "record": record,
    })))
}
