//! 登录用到的数据结构
//!
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 128, message = "username must be between 1 and 128 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = 256, message = "password must be between 1 and 256 characters"))]
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub status: String,
    pub user_id: i64,
    pub progress: i64,
    pub sheet_id: Option<String>,
    // 表格中查找用户所在行失败时为 null
    pub sheet_row: Option<u32>,
}
