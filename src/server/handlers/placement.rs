//! Article image placement endpoint.

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::Serialize;
use std::sync::Arc;

use super::super::state::AppState;
use super::{ApiError, Upload, join_error};
use crate::analyze::{AnalysisOutcome, ImageRecord};
use crate::placement::{self, PlacementPlan};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementResponse {
    /// Analysed images; plan indices point into this list.
    pub images: Vec<ImageRecord>,
    /// Images that could not be analysed and were left out of the plan.
    pub failed: Vec<AnalysisOutcome>,
    pub plan: PlacementPlan,
}

/// POST /api/placement - Analyse uploaded images and plan their placement.
///
/// No images is not an error: the plan then has four empty sections.
pub async fn plan(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<PlacementResponse>, ApiError> {
    let mut upload = Upload::read(multipart).await?;
    let inputs = upload.captioned_images();

    let analyzer = state.analyzer;
    let response = tokio::task::spawn_blocking(move || {
        let (analyzed, failed): (Vec<_>, Vec<_>) = analyzer
            .analyze_batch(&inputs)
            .into_iter()
            .partition(|o| o.record().is_some());
        let images: Vec<ImageRecord> = analyzed
            .into_iter()
            .filter_map(|o| match o {
                AnalysisOutcome::Analyzed(record) => Some(record),
                AnalysisOutcome::Failed { .. } => None,
            })
            .collect();
        let plan = placement::plan(&images);
        PlacementResponse {
            images,
            failed,
            plan,
        }
    })
    .await
    .map_err(join_error)?;

    Ok(Json(response))
}
