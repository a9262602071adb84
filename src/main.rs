use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod model;
mod service;

use model::Config;
use service::NvdClient;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    if config.nvd_api_key.is_some() {
        tracing::info!("NVD API key loaded");
    } else {
        tracing::warn!("NVD_API_KEY not set, /api/cves requests will fail");
    }

    let nvd_client = web::Data::new(NvdClient::new(config.nvd_api_key.clone()));

    tracing::info!("Starting cve-watch server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            // The frontend is served from a different origin
            .wrap(Cors::permissive())
            .app_data(nvd_client.clone())
            .configure(api::cves::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
