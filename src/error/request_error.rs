use crate::response::api_response::ApiErrorResponse;
use async_trait::async_trait;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum::{extract::Request, Json};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::Validate;

use super::error_code;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error(transparent)]
    ValidationError(#[from] validator::ValidationErrors),
    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),
    #[error(transparent)]
    QueryRejection(#[from] QueryRejection),
}

impl RequestError {
    fn get_code(&self) -> u32 {
        match self {
            RequestError::ValidationError(_) => error_code::VALIDATION_ERROR,
            RequestError::JsonRejection(_) => error_code::JSON_REJECTION,
            RequestError::QueryRejection(_) => error_code::QUERY_REJECTION,
        }
    }
}

/// 反序列化 JSON body 并执行校验
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedRequest<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedRequest<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = RequestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedRequest(value))
    }
}

/// 反序列化 query 参数并执行校验
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = RequestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        match self {
            RequestError::ValidationError(_) => ApiErrorResponse::send(
                400,
                self.get_code(),
                Some(self.to_string().replace('\n', ", ")),
            ),
            RequestError::JsonRejection(_) => {
                ApiErrorResponse::send(400, self.get_code(), Some(self.to_string()))
            }
            RequestError::QueryRejection(_) => {
                ApiErrorResponse::send(400, self.get_code(), Some(self.to_string()))
            }
        }
    }
}
