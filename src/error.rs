//! # Error Types
//!
//! This module defines error types used throughout the marquee library.
//!
//! Per-image failures (`Decode`, `InvalidImage`) are isolated by the batch
//! helpers in [`crate::analyze`]; `FontLoad` is always recovered by the
//! composer and never reaches a caller of `compose`.

use thiserror::Error;

/// Main error type for marquee operations
#[derive(Debug, Error)]
pub enum MarqueeError {
    /// Bytes are not a supported raster format (PNG/JPEG/WEBP/GIF)
    #[error("Decode error: {0}")]
    Decode(String),

    /// Image decoded but has degenerate dimensions
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Font asset could not be read or parsed
    #[error("Font load error: {0}")]
    FontLoad(String),

    /// Raster encoding failed
    #[error("Encode error: {0}")]
    Encode(String),

    /// Image download failed
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Invalid configuration or request
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MarqueeError {
    /// True for errors caused by the caller's input rather than by the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MarqueeError::Decode(_) | MarqueeError::InvalidImage(_) | MarqueeError::Config(_)
        )
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, MarqueeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(MarqueeError::Decode("x".into()).is_client_error());
        assert!(MarqueeError::InvalidImage("x".into()).is_client_error());
        assert!(!MarqueeError::Encode("x".into()).is_client_error());
        assert!(!MarqueeError::Fetch("x".into()).is_client_error());
    }

    #[test]
    fn test_display_prefix() {
        let err = MarqueeError::Decode("not a png".into());
        assert_eq!(err.to_string(), "Decode error: not a png");
    }
}
