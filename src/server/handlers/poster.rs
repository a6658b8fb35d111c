//! Poster composition endpoint.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;

use super::super::state::AppState;
use super::{ApiError, Upload, api_error, join_error};
use crate::analyze::{self, ImageInput};
use crate::poster::MAX_IMAGES;
use crate::poster::request::build_spec;

/// POST /api/poster - Compose a poster.
///
/// Photos come from `images` uploads followed by the request's
/// `imageUrls`. Only as many URLs are downloaded as there are free photo
/// slots; the rest count as dropped. Photos that fail to download or
/// decode are skipped.
/// The response body is the encoded poster; placement details are
/// reported in `x-poster-*` headers.
pub async fn compose(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut upload = Upload::read(multipart).await?;
    let request = upload.request.take().unwrap_or_default();
    request.canvas_size().map_err(api_error)?;

    let mut inputs = upload.captioned_images();
    let (urls, skipped) = urls_to_fetch(&request.image_urls, inputs.len());
    if skipped > 0 {
        tracing::debug!(skipped, "image URLs beyond the photo limit not downloaded");
    }
    for (url, result) in state.fetcher.fetch_all(urls).await {
        if let Ok(bytes) = result {
            inputs.push(ImageInput::new(url, bytes));
        }
    }
    let background = upload.background.take();

    let task_state = state.clone();
    let poster = tokio::task::spawn_blocking(move || {
        let images = task_state
            .analyzer
            .inspect_batch(&inputs)
            .into_iter()
            .filter_map(Result::ok)
            .collect();
        let background = background
            .map(|bytes| analyze::decode(&bytes).map(|(image, _)| image))
            .transpose()?;
        let spec = build_spec(&request, images, background)?;
        task_state.composer.compose(&spec)
    })
    .await
    .map_err(join_error)?
    .map_err(api_error)?;

    let filename = format!(
        "attachment; filename=\"poster.{}\"",
        state.composer.format().extension()
    );
    Ok((
        [
            (header::CONTENT_TYPE, poster.mime.to_string()),
            (header::CONTENT_DISPOSITION, filename),
            (
                header::HeaderName::from_static("x-poster-dropped-images"),
                (poster.layout.dropped_images + skipped).to_string(),
            ),
            (
                header::HeaderName::from_static("x-poster-abbreviated"),
                poster.layout.abbreviated.to_string(),
            ),
        ],
        poster.bytes,
    ))
}

/// URLs worth downloading after `uploaded` photos, and how many were left out.
fn urls_to_fetch(urls: &[String], uploaded: usize) -> (&[String], usize) {
    let keep = urls.len().min(MAX_IMAGES.saturating_sub(uploaded));
    (&urls[..keep], urls.len() - keep)
}
