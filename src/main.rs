mod api;
mod config;
mod database;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{
    middleware::{Compress, Logger},
    web, App, HttpServer,
};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::services::{MongoUserStore, UserService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        std::io::Error::other(e)
    })?;

    log::info!("🚀 Starting Scoreboard API...");
    log::info!("📊 Database: {} / {}", config.mongodb_uri, config.mongodb_database);

    let db = database::MongoDB::new(&config.mongodb_uri, &config.mongodb_database)
        .await
        .map_err(|e| {
            log::error!("❌ Failed to connect to MongoDB: {}", e);
            std::io::Error::other(e.to_string())
        })?;

    log::info!("✅ MongoDB connected successfully");

    let service = UserService::new(Arc::new(MongoUserStore::new(&db)), config.request_timeout);
    let service_data = web::Data::new(service);

    let bind_address = config.bind_address();
    log::info!("🌐 Server starting on {}", bind_address);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(service_data.clone())
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .configure(api::configure)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    log::info!("🛑 Server stopped, closing MongoDB connection");
    db.shutdown().await;

    Ok(())
}
