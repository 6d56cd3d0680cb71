// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, database, external clients, and start HTTP server

mod auth;
mod config;
mod cors;
mod db;
mod errors;
mod handlers;
mod models;
mod services;
mod validation;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use errors::ApiError;
use services::{
    start_cleanup_task, GeminiClient, GoogleIdentityClient, GooglePlacesClient, PlacesCache,
    PlanGenerator,
};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        // We continue but log error, or we could panic
    }

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    log::info!("Starting planorama-api...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize database connection pool and apply migrations
    let pool = match config::init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config::run_migrations(&pool).await {
        log::error!("Failed to apply migrations: {}", e);
        std::process::exit(1);
    }

    // 5. Initialize cache for Google Places API responses
    let cache = Arc::new(PlacesCache::new(3600)); // 1 hour TTL
    log::info!("Initialized Places API cache (TTL: 1 hour)");

    // Start background cleanup task (runs every 5 minutes)
    start_cleanup_task(cache.clone(), 300);
    log::info!("Started cache cleanup task (interval: 5 minutes)");

    // 6. Construct external clients once; every worker shares them
    let identity = web::Data::new(GoogleIdentityClient::new(config.google_client_id.clone()));
    let places = web::Data::new(GooglePlacesClient::new(
        config.google_places_api_key.clone(),
        cache.clone(),
    ));
    let generator: Arc<dyn PlanGenerator> =
        Arc::new(GeminiClient::new(config.gemini_api_key.clone()));
    let generator = web::Data::from(generator);

    // 7. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let config_clone = config.clone();
    let cors_origin = config.cors_origin.clone();

    HttpServer::new(move || {
        App::new()
            // Application state (database pool, config, and external clients)
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_clone.clone()))
            .app_data(identity.clone())
            .app_data(places.clone())
            .app_data(generator.clone())
            .app_data(json_config())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            .wrap(cors::default(&cors_origin))
            // Routes
            .configure(handlers::configure)
    })
    .bind(&server_addr)?
    .run()
    .await
}

/// Malformed or missing JSON bodies answer with the same `{ message }`
/// shape the error type produces everywhere else.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}
