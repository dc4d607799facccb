use crate::error::ApiError;
use crate::services::run_blocking;
use crate::store::SqliteStore;
use actix_web::{web, HttpResponse};

pub(crate) async fn process(store: web::Data<SqliteStore>) -> Result<HttpResponse, ApiError> {
    let store = store.get_ref().clone();
    let records = run_blocking(move || store.list_records()).await?;
    Ok(HttpResponse::Ok().json(records))
}
