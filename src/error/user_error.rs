use crate::error::error_code;
use crate::response::api_response::ApiErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UserError {
    #[error("User not found")]
    UserNotFound,
    // 用户不存在和密码错误返回同样的信息
    #[error("Invalid login")]
    InvalidCredentials,
    #[error("User banned")]
    Banned,
    #[error("Account expired")]
    Expired,
}

impl UserError {
    fn get_code(&self) -> u32 {
        match self {
            UserError::UserNotFound => error_code::USER_NOT_FOUND,
            UserError::InvalidCredentials => error_code::INVALID_CREDENTIALS,
            UserError::Banned => error_code::USER_BANNED,
            UserError::Expired => error_code::ACCOUNT_EXPIRED,
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status_code = match self {
            UserError::UserNotFound => StatusCode::NOT_FOUND,
            UserError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            UserError::Banned => StatusCode::FORBIDDEN,
            UserError::Expired => StatusCode::FORBIDDEN,
        };

        ApiErrorResponse::send(
            status_code.as_u16(),
            self.get_code(),
            Some(self.to_string()),
        )
    }
}
