use crate::error::{
    call_list_error::CallListError, upstream_error::UpstreamError, user_error::UserError,
};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::request_error::RequestError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    UserError(#[from] UserError),
    #[error(transparent)]
    UpstreamError(#[from] UpstreamError),
    #[error(transparent)]
    CallListError(#[from] CallListError),
    #[error(transparent)]
    RequestError(#[from] RequestError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::UserError(error) => error.into_response(),
            ApiError::UpstreamError(error) => error.into_response(),
            ApiError::CallListError(error) => error.into_response(),
            ApiError::RequestError(error) => error.into_response(),
        }
    }
}
