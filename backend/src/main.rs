use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use backend::config::ServerConfig;
use backend::ingest::upload::purge_stale;
use backend::store::SqliteStore;
use backend::AppState;
use env_logger::Env;
use log::info;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = ServerConfig::load().map_err(io::Error::other)?;
    std::fs::create_dir_all(&config.uploads.dir)?;
    purge_stale(&config.uploads.dir)?;

    let store = SqliteStore::open(&config.database_path).map_err(io::Error::other)?;
    info!("Using database {}", config.database_path.display());
    let state = AppState::new(store, config.uploads.clone());

    info!("Server running at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(|cfg| state.configure(cfg))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    // The last handle to the store goes away with the server's app factory.
    info!("Server stopped");
    Ok(())
}
