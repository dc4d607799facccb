//! Single-record CRUD under `/api/records`.
//!
//! Creation goes through the ingestion pipeline as a one-row `manual-entry`
//! batch; updates re-apply the row validator. Deleting a record never touches
//! the batch that created it.

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

mod create;
mod list;
mod remove;
mod update;

const API_PATH: &str = "/api/records";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{id}", put().to(update::process))
        .route("/{id}", delete().to(remove::process))
}
