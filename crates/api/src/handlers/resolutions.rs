use crate::{
    dto::{MessageResponse, RecordResolutionRequest, ResolutionDto},
    errors::ApiError,
    state::AppState,
};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{debug, error, instrument, warn};

#[instrument(skip(state, payload), name = "api_record_resolution")]
pub async fn record_resolution(
    State(state): State<AppState>,
    payload: Result<Json<RecordResolutionRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let report = match payload {
        Ok(Json(request)) => request.into_report(),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected resolution report");
            return Err(ApiError::InvalidRequest);
        }
    }
    .ok_or_else(|| {
        warn!("Rejected resolution report with blank hostname");
        ApiError::InvalidRequest
    })?;

    state.record_resolution.execute(report).await?;

    Ok(Json(MessageResponse {
        message: "Resolution recorded",
    }))
}

#[instrument(skip(state), name = "api_get_resolutions")]
pub async fn get_resolutions(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResolutionDto>>, ApiError> {
    match state.get_resolutions.execute(None).await {
        Ok(reports) => {
            debug!(count = reports.len(), "Resolutions retrieved");
            Ok(Json(reports.into_iter().map(ResolutionDto::from).collect()))
        }
        Err(e) => {
            error!(error = %e, "Failed to retrieve resolutions");
            Err(e.into())
        }
    }
}
