//! Runtime configuration.
//!
//! Values come from CLI flags or their `MARQUEE_*` environment variables
//! (see `main.rs`); library callers build these structs directly.

use std::path::PathBuf;
use std::time::Duration;

use crate::poster::{Composer, OutputFormat};
use crate::text::Typeface;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5001";
/// Upload and download size cap, 16 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Per-render settings.
#[derive(Debug, Clone, Default)]
pub struct ComposeOptions {
    /// TTF/OTF font file. The builtin bitmap font is used when unset or
    /// unreadable.
    pub font_path: Option<PathBuf>,
    pub format: OutputFormat,
}

impl ComposeOptions {
    /// A composer for these options. Never fails: font problems degrade to
    /// the builtin font.
    pub fn composer(&self) -> Composer {
        Composer::new(Typeface::load_or_builtin(self.font_path.as_deref()), self.format)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:5001")
    pub listen_addr: String,
    pub compose: ComposeOptions,
    /// Largest accepted request body and downloaded image.
    pub max_upload_bytes: usize,
    pub fetch_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            compose: ComposeOptions::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:5001");
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
        assert_eq!(config.compose.format, OutputFormat::Png);
    }

    #[test]
    fn test_missing_font_still_composes() {
        let options = ComposeOptions {
            font_path: Some(PathBuf::from("/nonexistent.ttf")),
            format: OutputFormat::jpeg(),
        };
        assert_eq!(options.composer().format(), OutputFormat::jpeg());
    }
}
