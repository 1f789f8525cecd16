use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::{LEGACY_SECRET_ENV, StaticConfig};
use crate::services::LinkService;
use crate::storage::StorageFactory;
use crate::utils::ThreadRandom;

pub struct StartupContext {
    pub config: StaticConfig,
    pub link_service: Arc<LinkService>,
}

/// 准备启动上下文：检查密钥、打开存储、组装 LinkService
///
/// A store root that is missing and cannot be created fails here, before
/// anything is served.
pub async fn prepare_startup(config: StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    if !config.secret_configured() {
        warn!(
            "Warning: no --secret-key flag, FL__STORE__SECRET_KEY or {} environment variable provided, anyone is able to create short URLs",
            LEGACY_SECRET_ENV
        );
    }

    let store = StorageFactory::create(&config.store)
        .await
        .with_context(|| format!("Failed to open data folder {}", config.store.data_folder))?;
    info!("Using store backend: {}", store.backend_name());

    let link_service = Arc::new(LinkService::new(store, Arc::new(ThreadRandom)));

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        config,
        link_service,
    })
}
