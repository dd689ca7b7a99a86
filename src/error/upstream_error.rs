use crate::error::error_code;
use crate::response::api_response::ApiErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// 调用外部服务 (数据库REST接口 / 表格接口) 产生的错误
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("{service} request failed: {source}")]
    Request {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} returned unexpected status {status}")]
    UnexpectedStatus { service: &'static str, status: u16 },
    #[error("{service} response decode failed: {reason}")]
    Decode {
        service: &'static str,
        reason: String,
    },
    // 写入未被确认，对外表现为 400
    #[error("{0}")]
    WriteRejected(String),
    #[error("spreadsheet token error: {0}")]
    Token(String),
    #[error("Spreadsheet not configured")]
    SheetNotConfigured,
    #[error("invalid user record: {0}")]
    InvalidRecord(String),
}

impl UpstreamError {
    fn get_code(&self) -> u32 {
        match self {
            UpstreamError::Request { .. } => error_code::UPSTREAM_REQUEST_FAILED,
            UpstreamError::UnexpectedStatus { .. } => error_code::UPSTREAM_UNEXPECTED_STATUS,
            UpstreamError::Decode { .. } => error_code::UPSTREAM_DECODE_FAILED,
            UpstreamError::WriteRejected(_) => error_code::UPSTREAM_WRITE_REJECTED,
            UpstreamError::Token(_) => error_code::SHEET_TOKEN_ERROR,
            UpstreamError::SheetNotConfigured => error_code::SHEET_NOT_CONFIGURED,
            UpstreamError::InvalidRecord(_) => error_code::INVALID_USER_RECORD,
        }
    }
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        let status_code = match self {
            UpstreamError::WriteRejected(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        ApiErrorResponse::send(
            status_code.as_u16(),
            self.get_code(),
            Some(self.to_string()),
        )
    }
}
