//! Server mode
//!
//! Configures and starts the HTTP server with the shorturl routes.

use actix_web::{App, HttpServer, middleware::DefaultHeaders, web};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::middleware::TimingMiddleware;
use crate::api::{ShortUrlSettings, shorturl_routes};
use crate::runtime::lifetime::{StartupContext, shutdown};

/// 请求体大小上限
const MAX_PAYLOAD_BYTES: usize = 64 * 1024;

/// worker 数量上限
const MAX_WORKERS: usize = 32;

/// Run the HTTP server until it stops or Ctrl+C arrives
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(startup: StartupContext) -> Result<()> {
    let config = startup.config;
    let link_service = startup.link_service;

    let settings = ShortUrlSettings::new(config.store.secret_key.clone(), config.server.port);
    let cpu_count = config.server.cpu_count.clamp(1, MAX_WORKERS);
    warn!("Using {} CPU cores for the server", cpu_count);

    let bind_address = (config.server.host.clone(), config.server.port);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TimingMiddleware)
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .app_data(web::Data::new(link_service.clone()))
            .app_data(web::Data::new(settings.clone()))
            .app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
            .configure(shorturl_routes)
    })
    .workers(cpu_count)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}:{}", bind_address.0, bind_address.1))?
    .run();

    info!(
        "flatlinker serving on port {} at {}",
        config.server.port, config.store.data_folder
    );

    let handle = server.handle();

    // Wait for server or shutdown signal
    tokio::select! {
        res = server => {
            res?;
        }
        _ = shutdown::listen_for_shutdown() => {
            handle.stop(true).await;
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
