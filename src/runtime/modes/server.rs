//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::middleware::RequestLog;
use crate::api::services::{AppStartTime, health_routes, index_routes, plot_routes};
use crate::config::{CorsConfig, get_config};
use crate::runtime::lifetime;

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(cors_config: &CorsConfig) {
    if cors_config.enabled && cors_config.allowed_origins.is_empty() {
        warn!(
            "CORS enabled but allowed_origins is empty. \
            No cross-origin requests will be allowed. \
            Set allowed_origins explicitly or use '[\"*\"]' for any origin."
        );
    }
}

/// Build CORS middleware from configuration
///
/// Only GET and HEAD are ever served, so methods are fixed.
pub fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    // Disabled: browser's default same-origin policy
    if !cors_config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default().allowed_methods(vec!["GET", "HEAD"]);

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors.max_age(cors_config.max_age as usize)
}

/// Run the HTTP server
///
/// This function:
/// 1. Records startup time
/// 2. Prepares shared services (plots, places, geolocation)
/// 3. Configures and starts the HTTP server
/// 4. Listens for the shutdown signal
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let config = get_config();

    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let plot_service = startup.plot_service;
    let enricher = startup.enricher;
    let geoip = startup.geoip;
    let map_config = config.map.clone();
    let cors_config = config.cors.clone();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    validate_cors_config(&cors_config);

    let server = HttpServer::new(move || {
        let cors = build_cors_middleware(&cors_config);

        App::new()
            .wrap(RequestLog)
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache")))
            .app_data(web::Data::from(plot_service.clone()))
            .app_data(web::Data::from(enricher.clone()))
            .app_data(web::Data::from(geoip.clone()))
            .app_data(web::Data::new(map_config.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .service(health_routes())
            .service(plot_routes())
            .service(index_routes())
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Graceful shutdown complete");
        }
    }

    Ok(())
}
