use crate::error::ApiError;
use crate::services::run_blocking;
use crate::store::SqliteStore;
use actix_web::{web, HttpResponse};
use common::model::batch::BatchId;

/// Unknown batch ids yield an empty list.
pub(crate) async fn process(
    batch_id: web::Path<BatchId>,
    store: web::Data<SqliteStore>,
) -> Result<HttpResponse, ApiError> {
    let batch_id = batch_id.into_inner();
    let store = store.get_ref().clone();
    let records = run_blocking(move || store.records_for_batch(batch_id)).await?;
    Ok(HttpResponse::Ok().json(records))
}
