use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Deserialize, Validate)]
pub struct SaveProgressReq {
    #[validate(range(min = 0, message = "user_id must not be negative"))]
    pub user_id: i64,
    #[validate(range(min = 0, message = "progress must not be negative"))]
    pub progress: i64,
}

#[derive(Clone, Deserialize, Validate)]
pub struct UserIdQuery {
    #[validate(range(min = 0, message = "user_id must not be negative"))]
    pub user_id: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProgressRes {
    pub progress: i64,
}
