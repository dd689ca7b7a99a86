use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::error::{api_error::ApiError, request_error::ValidatedRequest};
use crate::state::auth_state::AuthState;
use axum::{extract::State, Json};
use axum_macros::debug_handler;

#[debug_handler]
pub async fn login(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    // 只比较日期
    let today = chrono::Local::now().date_naive();
    let res = state.auth_service.login(&payload, today).await?;
    Ok(Json(res))
}
