//! Image analysis endpoint.

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde::Serialize;
use std::sync::Arc;

use super::super::state::AppState;
use super::{ApiError, Upload, join_error};
use crate::analyze::AnalysisOutcome;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// One outcome per uploaded image, in upload order.
    pub images: Vec<AnalysisOutcome>,
}

/// POST /api/images/analyze - Analyse uploaded images.
///
/// A bad image is reported in its own outcome; the request still succeeds.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let mut upload = Upload::read(multipart).await?;
    let inputs = upload.captioned_images();
    if inputs.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "No images uploaded".to_string()));
    }

    let analyzer = state.analyzer;
    let images = tokio::task::spawn_blocking(move || analyzer.analyze_batch(&inputs))
        .await
        .map_err(join_error)?;

    Ok(Json(AnalyzeResponse { images }))
}
