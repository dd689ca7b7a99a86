use crate::error::error_code;
use crate::response::api_response::ApiErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CallListError {
    #[error("Row out of range: {0}")]
    RowOutOfRange(u32),
}

impl IntoResponse for CallListError {
    fn into_response(self) -> Response {
        let code = match self {
            CallListError::RowOutOfRange(_) => error_code::ROW_OUT_OF_RANGE,
        };
        ApiErrorResponse::send(StatusCode::NOT_FOUND.as_u16(), code, Some(self.to_string()))
    }
}
