//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected paths exist at startup.

use std::path::Path;

use tracing::warn;

/// Warn when the static asset directory is missing and make sure the
/// directory holding the reservation file exists.
pub async fn ensure_env(static_dir: &str, data_file: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(static_dir).await.is_err() {
        warn!(%static_dir, "static assets directory not found; static assets may 404");
    }
    if let Some(parent) = Path::new(data_file).parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    if tokio::fs::metadata(data_file).await.is_err() {
        warn!(%data_file, "reservation file not found; /api/reservations will fail until it is created");
    }
    Ok(())
}
