//! 数据库 `users` 表的数据模型
//!
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    // 数据库中可能为 null
    #[serde(default, deserialize_with = "null_as_false")]
    pub banned: bool,
    #[serde(default)]
    pub expiry: Option<String>,
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default)]
    pub sheet_id: Option<String>,
}

impl User {
    pub fn progress(&self) -> i64 {
        self.progress.unwrap_or(0)
    }

    /// 解析过期日期，兼容 `2024-01-01T00:00:00` 这类带时间的值，只取日期部分
    pub fn expiry_date(&self) -> Option<Result<NaiveDate, chrono::ParseError>> {
        let expiry = self.expiry.as_deref()?.trim();
        if expiry.is_empty() {
            return None;
        }
        let date_part = expiry.get(..10).unwrap_or(expiry);
        Some(NaiveDate::parse_from_str(date_part, "%Y-%m-%d"))
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
