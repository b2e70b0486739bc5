mod handlers;
mod models;
mod db;
mod errors;

use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use std::io;
use log::info;
use crate::db::DbConfig;

const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:8080";

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    // Connection parameters only; each request opens its own connection.
    let db_config = DbConfig::from_env()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    info!("Using database {} at {}:{}", db_config.database, db_config.host, db_config.port);

    let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string());
    info!("Starting server at {}", server_addr);

    let db_config = web::Data::new(db_config);

    HttpServer::new(move || {
        App::new()
            .app_data(db_config.clone())
            .configure(handlers::configure)
    })
    .bind(&server_addr)?
    .run()
    .await
}
