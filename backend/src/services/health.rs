//! `GET /health`: checks that the database answers.

use crate::error::ApiError;
use crate::services::run_blocking;
use crate::store::SqliteStore;
use actix_web::web::{get, scope};
use actix_web::{web, HttpResponse, Scope};
use serde_json::json;

pub fn configure_routes() -> Scope {
    scope("/health").route("", get().to(process))
}

async fn process(store: web::Data<SqliteStore>) -> Result<HttpResponse, ApiError> {
    let store = store.get_ref().clone();
    let now = run_blocking(move || store.now()).await?;
    Ok(HttpResponse::Ok().json(json!({ "now": now })))
}
