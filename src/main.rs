pub mod config;
pub mod db;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod service;

use std::io;
use std::sync::Arc;

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use sqlx::{postgres::Postgres, Pool};

use crate::{
    config::AppConfig,
    db::{init_db_pool, PgStore, Store},
    service::log::{init_logger, LoggerMiddleware},
};

type PGPool = Pool<Postgres>;

fn startup_error(err: impl std::fmt::Display) -> io::Error {
    error!("startup failed: {}", err);
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    init_logger();

    let config = AppConfig::from_env().map_err(startup_error)?;
    let pool: PGPool = init_db_pool(&config).await.map_err(startup_error)?;
    let pg_store = PgStore::new(pool);
    pg_store.ensure_schema().await.map_err(startup_error)?;
    let store: web::Data<dyn Store> = web::Data::from(Arc::new(pg_store) as Arc<dyn Store>);

    info!(
        "listening on {}:{} (report basis: {})",
        config.bind_addr, config.port, config.report_basis
    );
    let jwt_secret = config.jwt_secret.clone();
    let report_basis = config.report_basis;
    HttpServer::new(move || {
        let store = store.clone();
        let jwt_secret = jwt_secret.clone();
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(LoggerMiddleware)
            .configure(move |cfg| handlers::init_app(cfg, store, &jwt_secret, report_basis))
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}
