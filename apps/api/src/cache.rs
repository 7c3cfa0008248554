//! Brands file cache.
//!
//! `/api/brands` serves live upstream data when it can and falls back to the
//! last good copy persisted at `server/.cache/brands.json` when it can't.
//! The cache survives restarts; a cold start with a dead upstream still has
//! brands to show as long as one successful fetch ever happened.

use std::path::Path;

use tokio::fs;
use tracing::debug;

use rost_core::Brand;

/// Cache errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache read failed: {0}")]
    Read(#[from] std::io::Error),

    #[error("Cache parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reads the cached brand list.
pub async fn read_brands(path: &Path) -> Result<Vec<Brand>, CacheError> {
    let raw = fs::read_to_string(path).await?;
    let brands = serde_json::from_str(&raw)?;
    Ok(brands)
}

/// Writes the brand list to the cache, creating parent directories as needed.
pub async fn write_brands(path: &Path, brands: &[Brand]) -> Result<(), CacheError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let raw = serde_json::to_string_pretty(brands)?;
    fs::write(path, raw).await?;

    debug!(path = %path.display(), count = brands.len(), "Brands cache written");
    Ok(())
}
