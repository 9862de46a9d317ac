#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the theft map.
//!
//! Serves the rendered map, legend, and bar chart page at `/` and a small
//! JSON API under `/api`. The datasets are re-read on every request, so
//! replacing a file on disk is picked up without a restart.

mod handlers;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use std::path::PathBuf;
use std::sync::Arc;
use theft_map_chart::config::load_config;
use theft_map_chart::models::ChartConfig;

/// Environment variable naming an optional configuration file.
pub const CONFIG_ENV_VAR: &str = "THEFT_MAP_CONFIG";

/// Shared application state.
pub struct AppState {
    /// Chart configuration, fixed for the lifetime of the server.
    pub config: Arc<ChartConfig>,
}

/// Registers the page and API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index)).service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/series", web::get().to(handlers::series)),
    );
}

/// Loads the configuration named by [`CONFIG_ENV_VAR`], or the embedded
/// defaults when it is unset.
///
/// # Errors
///
/// Returns an `std::io::Error` if the configured file cannot be read or
/// parsed.
pub fn config_from_env() -> std::io::Result<ChartConfig> {
    let path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    load_config(path.as_deref()).map_err(std::io::Error::other)
}

/// Starts the theft map server.
///
/// Loads the configuration and starts the Actix-Web HTTP server. The
/// caller is responsible for providing the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the configuration cannot be
/// loaded, or if the HTTP server fails to bind or encounters a runtime
/// error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Loading chart configuration...");
    let config = config_from_env()?;
    let state = web::Data::new(AppState {
        config: Arc::new(config),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
