use crate::response::api_response::StatusResponse;
use axum::Json;

pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse::new("server running"))
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse::new("ok"))
}
