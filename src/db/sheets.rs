use crate::db::google_auth::TokenProvider;
use crate::error::upstream_error::UpstreamError;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

const SERVICE: &str = "spreadsheet";

/// 列号转字母 (1 -> A, 27 -> AA)
pub fn column_letter(mut column: u32) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let rem = ((column - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        column = (column - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// 整列范围，例如 `'Users'!A:A`
pub fn a1_column(tab: &str, column: u32) -> String {
    a1_columns(tab, column, column)
}

/// 多列范围，例如 `'Sheet1'!A:C`
pub fn a1_columns(tab: &str, from_column: u32, to_column: u32) -> String {
    format!(
        "{}!{}:{}",
        quote_tab(tab),
        column_letter(from_column),
        column_letter(to_column)
    )
}

pub fn a1_cell(tab: &str, column: u32, row: u32) -> String {
    format!("{}!{}{}", quote_tab(tab), column_letter(column), row)
}

fn quote_tab(tab: &str) -> String {
    format!("'{}'", tab.replace('\'', "''"))
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Option<Vec<Vec<Value>>>,
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// 表格 values 接口的客户端，只支持按范围读取和写入单元格
#[derive(Clone)]
pub struct SheetsClient {
    http: Client,
    api_url: Url,
    spreadsheet_id: String,
    tokens: Arc<dyn TokenProvider>,
}

impl SheetsClient {
    pub fn new(
        http: &Client,
        api_url: &Url,
        spreadsheet_id: &str,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            http: http.clone(),
            api_url: api_url.clone(),
            spreadsheet_id: spreadsheet_id.to_string(),
            tokens,
        }
    }

    fn values_url(&self, range: &str) -> Url {
        let mut url = self.api_url.clone();
        // 配置阶段已经保证 url 可以作为 base
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", range]);
        }
        url
    }

    /// 读取范围内的值，范围超出数据时返回空
    pub async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, UpstreamError> {
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .get(self.values_url(range))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|source| UpstreamError::Request {
                service: SERVICE,
                source,
            })?;

        if response.status() != StatusCode::OK {
            tracing::error!("sheet read {} failed, status:{}", range, response.status());
            return Err(UpstreamError::UnexpectedStatus {
                service: SERVICE,
                status: response.status().as_u16(),
            });
        }

        let body = response
            .json::<ValueRange>()
            .await
            .map_err(|err| UpstreamError::Decode {
                service: SERVICE,
                reason: err.to_string(),
            })?;

        Ok(body
            .values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    /// 写入单个单元格，按原始值写入，不解析公式
    pub async fn update_value(&self, range: &str, value: Value) -> Result<(), UpstreamError> {
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .put(self.values_url(range))
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(token)
            .json(&json!({
                "range": range,
                "majorDimension": "ROWS",
                "values": [[value]],
            }))
            .send()
            .await
            .map_err(|source| UpstreamError::Request {
                service: SERVICE,
                source,
            })?;

        if response.status() != StatusCode::OK {
            tracing::error!("sheet write {} failed, status:{}", range, response.status());
            return Err(UpstreamError::UnexpectedStatus {
                service: SERVICE,
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use httpmock::prelude::*;

    struct StaticToken;

    #[async_trait]
    impl TokenProvider for StaticToken {
        async fn access_token(&self) -> Result<String, UpstreamError> {
            Ok("test-token".to_string())
        }
    }

    fn client(server: &MockServer) -> SheetsClient {
        SheetsClient::new(
            &Client::new(),
            &Url::parse(&server.base_url()).unwrap(),
            "doc-1",
            Arc::new(StaticToken),
        )
    }

    #[test]
    fn column_letters() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(3), "C");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(703), "AAA");
    }

    #[test]
    fn ranges_quote_tab_names() {
        assert_eq!(a1_columns("Sheet1", 1, 3), "'Sheet1'!A:C");
        assert_eq!(a1_column("Bob's list", 2), "'Bob''s list'!B:B");
        assert_eq!(a1_cell("Users", 2, 7), "'Users'!B7");
    }

    #[test]
    fn range_is_a_single_encoded_path_segment() {
        let server_url = Url::parse("https://sheets.example.com/").unwrap();
        let client = SheetsClient::new(&Client::new(), &server_url, "doc-1", Arc::new(StaticToken));
        let url = client.values_url("'Sheet 1'!A1:C2");
        assert!(url
            .as_str()
            .starts_with("https://sheets.example.com/v4/spreadsheets/doc-1/values/"));
        assert!(!url.path().contains(" "));
    }

    #[tokio::test]
    async fn get_values_stringifies_cells() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path_includes("/v4/spreadsheets/doc-1/values/")
                    .header("authorization", "Bearer test-token");
                then.status(200).json_body(serde_json::json!({
                    "range": "Sheet1!A1:C2",
                    "majorDimension": "ROWS",
                    "values": [["name", "phone"], ["Ann", 5550101]]
                }));
            })
            .await;

        let rows = client(&server).get_values("Sheet1!A1:C2").await.unwrap();
        assert_eq!(rows, vec![vec!["name", "phone"], vec!["Ann", "5550101"]]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_values_means_empty_range() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200)
                    .json_body(serde_json::json!({"range": "Sheet1!A50:C50", "majorDimension": "ROWS"}));
            })
            .await;

        assert!(client(&server).get_values("Sheet1!A50:C50").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_value_puts_raw_value() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path_includes("/values/")
                    .query_param("valueInputOption", "RAW")
                    .json_body(serde_json::json!({
                        "range": "'Sheet1'!C4",
                        "majorDimension": "ROWS",
                        "values": [["no answer"]]
                    }));
                then.status(200).json_body(serde_json::json!({"updatedCells": 1}));
            })
            .await;

        client(&server)
            .update_value("'Sheet1'!C4", Value::from("no answer"))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn failed_write_is_upstream_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(PUT);
                then.status(403);
            })
            .await;

        let err = client(&server)
            .update_value("'Sheet1'!C4", Value::from(1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UpstreamError::UnexpectedStatus { status: 403, .. }
        ));
    }
}
