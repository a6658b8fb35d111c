//! # Marquee - Promotional Poster and Article Image Library
//!
//! Marquee turns a store's photos into marketing material. It provides:
//!
//! - **Image analysis**: dimensions, dominant colors, region brightness and
//!   a coarse content category per image
//! - **Poster composition**: a deterministic canvas layout of headline,
//!   photos, body text, period line and call-to-action button
//! - **Article placement**: which photos go in which section of a store
//!   article, and in what order
//!
//! ## Quick Start
//!
//! ```no_run
//! use marquee::{
//!     analyze::{ImageAnalyzer, ImageInput},
//!     poster::{Composer, PosterRequest, request::build_spec},
//! };
//!
//! let bytes = std::fs::read("latte.png")?;
//! let photo = ImageAnalyzer::default().inspect(&ImageInput::new("latte.png", bytes))?;
//!
//! let request = PosterRequest {
//!     title: Some("Summer Latte Week".to_string()),
//!     category: Some("food".to_string()),
//!     ..Default::default()
//! };
//! let spec = build_spec(&request, vec![photo], None)?;
//! let poster = Composer::default().compose(&spec)?;
//! std::fs::write("poster.png", &poster.bytes)?;
//!
//! # Ok::<(), marquee::MarqueeError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`analyze`] | Image analysis and content categories |
//! | [`caption`] | Caption providers used for categorisation |
//! | [`contrast`] | Text colors for a background brightness |
//! | [`text`] | Fonts, wrapping and text drawing |
//! | [`poster`] | Poster requests, copy, layout and encoding |
//! | [`placement`] | Article section placement plans |
//! | [`fetch`] | Image downloads |
//! | [`server`] | HTTP API |
//! | [`error`] | Error types |

pub mod analyze;
pub mod caption;
pub mod color;
pub mod config;
pub mod contrast;
pub mod error;
pub mod fetch;
pub mod placement;
pub mod poster;
pub mod providers;
pub mod server;
pub mod text;
pub mod theme;

// Re-exports for convenience
pub use analyze::{ImageAnalyzer, ImageRecord};
pub use error::MarqueeError;
pub use placement::{PlacementPlan, plan};
pub use poster::{Composer, PosterRequest};
