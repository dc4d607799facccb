//! Person records with all-or-nothing CSV batch ingestion.
//!
//! The server accepts CSV uploads of `name,age,city` rows and stores each
//! accepted file as an upload batch in SQLite. See [`ingest`] for the
//! ingestion rules and [`store`] for the transactional storage contract.

pub mod config;
pub mod error;
pub mod ingest;
pub mod services;
pub mod store;

use crate::config::UploadSettings;
use crate::error::ApiError;
use crate::ingest::IngestPipeline;
use crate::store::SqliteStore;
use actix_web::web;
use log::debug;

/// The pipeline as wired into the server.
pub type AppPipeline = IngestPipeline<SqliteStore>;

/// Largest accepted JSON body for record endpoints.
const JSON_LIMIT: usize = 64 * 1024;

/// Shared handles injected into every worker.
///
/// Built once at startup; each worker gets clones of the same `Arc`s, so all
/// requests share one storage handle.
#[derive(Clone)]
pub struct AppState {
    store: web::Data<SqliteStore>,
    pipeline: web::Data<AppPipeline>,
    uploads: web::Data<UploadSettings>,
}

impl AppState {
    pub fn new(store: SqliteStore, uploads: UploadSettings) -> Self {
        Self {
            pipeline: web::Data::new(IngestPipeline::new(store.clone())),
            store: web::Data::new(store),
            uploads: web::Data::new(uploads),
        }
    }

    /// Registers app data and every route on an Actix app.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.store.clone())
            .app_data(self.pipeline.clone())
            .app_data(self.uploads.clone())
            .app_data(
                web::JsonConfig::default()
                    .limit(JSON_LIMIT)
                    .error_handler(|err, _req| {
                        debug!("Rejected JSON payload: {}", err);
                        ApiError::InvalidRecord.into()
                    }),
            )
            .service(services::health::configure_routes())
            .service(services::uploads::configure_routes())
            .service(services::records::configure_routes());
    }
}
