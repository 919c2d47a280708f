//! Cost estimation endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::DataResponse;
use crate::app::AppState;
use crate::domain::EstimateForm;
use crate::error::{ApiResult, EstimateError};

/// Generate a cost estimate for a construction project.
///
/// POST /estimates
pub async fn create_estimate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EstimateForm>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(form) = payload.map_err(|e| EstimateError::Validation(e.body_text()))?;
    let request = form.into_request()?;

    tracing::info!(
        project_type = %request.project_type,
        location = %request.location,
        area_sq_ft = request.area_sq_ft,
        floors = request.floors,
        quality = %request.quality,
        "Estimate requested"
    );

    let estimate = state.estimator.estimate(&request).await?;

    Ok(DataResponse::new(estimate))
}
