//! # HTTP Server
//!
//! JSON and multipart API over image analysis, poster composition and
//! article image placement.
//!
//! ## Usage
//!
//! ```bash
//! marquee serve --listen 0.0.0.0:5001 --font /usr/share/fonts/NanumGothic.ttf
//! ```
//!
//! | Route                     | Body                                        | Returns        |
//! |---------------------------|---------------------------------------------|----------------|
//! | `GET /health`             |                                             | status JSON    |
//! | `POST /api/images/analyze`| multipart `images` files, `captions` JSON   | records JSON   |
//! | `POST /api/poster`        | multipart `request` JSON, `images`, `background` | PNG/JPEG  |
//! | `POST /api/placement`     | multipart `images` files, `captions` JSON   | plan JSON      |

mod handlers;
mod state;

pub use crate::config::ServerConfig;
pub use state::AppState;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::{MarqueeError, Result};

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/images/analyze", post(handlers::analyze::analyze))
        .route("/api/poster", post(handlers::poster::compose))
        .route("/api/placement", post(handlers::placement::plan))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use marquee::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), marquee::MarqueeError> {
/// serve(ServerConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<()> {
    let state = Arc::new(AppState::new(config.clone())?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            MarqueeError::Config(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    tracing::info!(
        listen = %config.listen_addr,
        format = config.compose.format.extension(),
        max_upload = config.max_upload_bytes,
        "marquee server listening"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
