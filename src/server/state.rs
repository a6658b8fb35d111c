//! Server state.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::analyze::ImageAnalyzer;
use crate::config::ServerConfig;
use crate::error::Result;
use crate::fetch::ImageFetcher;
use crate::poster::Composer;

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub analyzer: ImageAnalyzer,
    pub composer: Composer,
    pub fetcher: ImageFetcher,
    /// Unix timestamp of server boot, reported by the health check.
    pub boot_time: u64,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self> {
        let boot_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let fetcher = ImageFetcher::new(config.fetch_timeout, config.max_upload_bytes)?;
        Ok(Self {
            analyzer: ImageAnalyzer::default(),
            composer: config.compose.composer(),
            fetcher,
            config,
            boot_time,
        })
    }
}
