use crate::dto::progress_dto::{ProgressRes, SaveProgressReq, UserIdQuery};
use crate::error::api_error::ApiError;
use crate::error::request_error::{ValidatedQuery, ValidatedRequest};
use crate::response::api_response::StatusResponse;
use crate::state::progress_state::ProgressState;
use axum::{extract::State, Json};

pub async fn save_progress(
    State(state): State<ProgressState>,
    ValidatedRequest(payload): ValidatedRequest<SaveProgressReq>,
) -> Result<Json<StatusResponse>, ApiError> {
    state
        .progress_service
        .save_progress(payload.user_id, payload.progress)
        .await?;
    Ok(Json(StatusResponse::new("saved")))
}

pub async fn get_progress(
    State(state): State<ProgressState>,
    ValidatedQuery(query): ValidatedQuery<UserIdQuery>,
) -> Result<Json<ProgressRes>, ApiError> {
    let progress = state.progress_service.get_progress(query.user_id).await?;
    Ok(Json(ProgressRes { progress }))
}
