//! HTTP handlers for the server.

pub mod analyze;
pub mod health;
pub mod placement;
pub mod poster;

use axum::{extract::Multipart, http::StatusCode};
use std::collections::HashMap;

use crate::analyze::ImageInput;
use crate::caption;
use crate::error::MarqueeError;
use crate::poster::PosterRequest;

/// Handler error: status plus a plain-text message.
pub type ApiError = (StatusCode, String);

/// Map a library error onto an HTTP status.
pub fn api_error(e: MarqueeError) -> ApiError {
    let status = if e.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, e.to_string())
}

/// Error for a failed blocking task.
pub fn join_error(e: tokio::task::JoinError) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Processing error: {}", e),
    )
}

/// Fields of a multipart upload.
#[derive(Debug, Default)]
pub struct Upload {
    /// `images` file fields, in upload order.
    pub images: Vec<ImageInput>,
    /// `captions` JSON object, source reference to caption.
    pub captions: HashMap<String, String>,
    /// `request` JSON object.
    pub request: Option<PosterRequest>,
    /// `background` file field.
    pub background: Option<Vec<u8>>,
}

impl Upload {
    /// Read every known field; unknown fields are skipped.
    pub async fn read(mut multipart: Multipart) -> Result<Upload, ApiError> {
        let mut upload = Upload::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("Multipart error: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await.map_err(|e| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read field '{}': {}", name, e),
                )
            })?;

            match name.as_str() {
                "images" | "image" => {
                    let source_ref =
                        file_name.unwrap_or_else(|| format!("upload-{}", upload.images.len()));
                    upload.images.push(ImageInput::new(source_ref, bytes.to_vec()));
                }
                "captions" => {
                    upload.captions = serde_json::from_slice(&bytes).map_err(|e| {
                        (StatusCode::BAD_REQUEST, format!("Invalid captions JSON: {}", e))
                    })?;
                }
                "request" => {
                    upload.request = Some(serde_json::from_slice(&bytes).map_err(|e| {
                        (StatusCode::BAD_REQUEST, format!("Invalid request JSON: {}", e))
                    })?);
                }
                "background" => upload.background = Some(bytes.to_vec()),
                other => tracing::debug!(field = other, "ignoring multipart field"),
            }
        }

        Ok(upload)
    }

    /// Uploaded images with captions attached from the supplied map and
    /// file names.
    pub fn captioned_images(&mut self) -> Vec<ImageInput> {
        let chain = caption::default_chain(std::mem::take(&mut self.captions));
        let mut images = std::mem::take(&mut self.images);
        caption::attach_captions(&mut images, &chain);
        images
    }
}
