//! 拨号列表相关的请求和响应
//!
use crate::config::parameter::DEFAULT_PAGE_LIMIT;
use crate::model::call_record::CallRecord;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 列表结束前返回记录，结束后返回 `{"done": true}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NextRes<T> {
    Found(T),
    Done { done: bool },
}

impl<T> NextRes<T> {
    pub fn done() -> Self {
        NextRes::Done { done: true }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NextRecord {
    pub index: u32,
    pub name: String,
    pub phone: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NextNumber {
    pub number: String,
}

#[derive(Clone, Deserialize, Validate)]
pub struct RowQuery {
    #[validate(range(max = 10_000_000, message = "row is out of range"))]
    pub row: u32,
}

#[derive(Clone, Deserialize, Validate)]
pub struct SaveRemarkReq {
    #[validate(range(min = 0, message = "user_id must not be negative"))]
    pub user_id: i64,
    #[validate(length(max = 500, message = "remark must be at most 500 characters"))]
    pub remark: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SaveRemarkRes {
    pub status: String,
    pub progress: i64,
}

#[derive(Clone, Deserialize, Validate)]
pub struct MarkCalledQuery {
    #[validate(range(max = 10_000_000, message = "row is out of range"))]
    pub row: u32,
    #[validate(length(max = 500, message = "remark must be at most 500 characters"))]
    pub remark: Option<String>,
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

#[derive(Clone, Deserialize, Validate)]
pub struct NumbersQuery {
    #[serde(default)]
    #[validate(range(max = 10_000_000, message = "start is out of range"))]
    pub start: u32,
    #[serde(default = "default_limit")]
    #[validate(range(max = 500, message = "limit must be at most 500"))]
    pub limit: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NumbersRes {
    pub numbers: Vec<CallRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SheetRowsRes {
    pub rows: Vec<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn next_serializes_untagged() {
        let found = NextRes::Found(NextNumber {
            number: "555-0100".to_string(),
        });
        assert_eq!(serde_json::to_value(found).unwrap(), json!({"number": "555-0100"}));
        assert_eq!(
            serde_json::to_value(NextRes::<NextNumber>::done()).unwrap(),
            json!({"done": true})
        );
    }
}
