use tokio::signal;
use tracing::{info, warn};

/// Resolve once Ctrl+C is received.
///
/// Every write is a single file operation, so there is nothing to flush; the
/// caller only has to stop accepting requests. If the signal handler cannot be
/// installed this never resolves and the server keeps running.
pub async fn listen_for_shutdown() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping server...");
        }
        Err(e) => {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
