mod api;
mod config;
mod database;
mod models;
mod services;
mod utils;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{
    middleware::{Compress, Logger},
    web, App, HttpServer,
};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::{AppConfig, StorageBackend};
use services::{InMemoryUserService, MongoUserService, UserService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    log::info!("🚀 Starting User Service...");

    // Store handle injetado nos handlers; o MongoDB conecta aqui e fecha no fim
    let (service, db): (Arc<dyn UserService>, Option<database::MongoDB>) = match config.storage {
        StorageBackend::MongoDb => {
            log::info!("📊 Database: {}", config.database_url);
            let db = database::MongoDB::new(&config)
                .await
                .map_err(|e| std::io::Error::other(format!("Failed to connect to MongoDB: {}", e)))?;
            let service: Arc<dyn UserService> = Arc::new(MongoUserService::new(&db));
            (service, Some(db))
        }
        StorageBackend::Memory => {
            log::warn!("⚠️  Using in-memory storage: data is lost on restart");
            let service: Arc<dyn UserService> = Arc::new(InMemoryUserService::new());
            (service, None)
        }
    };

    let service_data: web::Data<dyn UserService> = web::Data::from(service);
    let allowed_origins = config.cors_allowed_origins.clone();
    let bind_address = config.bind_address();

    log::info!("🌐 Server starting on {}", bind_address);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);
    log::info!("📄 OpenAPI spec at: http://{}/api-docs/openapi.json", bind_address);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(service_data.clone())
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
    })
    .bind(bind_address)?
    .run()
    .await?;

    if let Some(db) = db {
        db.shutdown().await;
    }

    Ok(())
}
