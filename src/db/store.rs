use crate::config::app_config::StoreConfig;
use crate::error::upstream_error::UpstreamError;
use crate::model::user::User;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::json;

const SERVICE: &str = "store";

/// 数据库 REST 接口 (PostgREST 风格) 的客户端
///
/// 只访问 `users` 表：按字段相等过滤查询，按 id 局部更新
#[derive(Clone)]
pub struct StoreClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl StoreClient {
    pub fn new(http: &Client, config: &StoreConfig) -> Self {
        Self {
            http: http.clone(),
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn users_request(&self, method: Method) -> RequestBuilder {
        self.http
            .request(method, format!("{}/rest/v1/users", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// 查询 users 表，`filters` 为 (字段, 值) 的相等过滤
    pub async fn select_users(&self, filters: &[(&str, String)]) -> Result<Vec<User>, UpstreamError> {
        let mut query: Vec<(&str, String)> = filters
            .iter()
            .map(|(column, value)| (*column, format!("eq.{}", value)))
            .collect();
        query.push(("select", "*".to_string()));

        let response = self
            .users_request(Method::GET)
            .query(&query)
            .send()
            .await
            .map_err(|source| UpstreamError::Request {
                service: SERVICE,
                source,
            })?;

        let status = response.status();
        tracing::debug!("store select status:{}", status);
        if status != StatusCode::OK {
            return Err(UpstreamError::UnexpectedStatus {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        response
            .json::<Vec<User>>()
            .await
            .map_err(|err| UpstreamError::Decode {
                service: SERVICE,
                reason: err.to_string(),
            })
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, UpstreamError> {
        let users = self
            .select_users(&[("username", username.to_string())])
            .await?;
        Ok(users.into_iter().next())
    }

    pub async fn find_user_by_id(&self, user_id: i64) -> Result<Option<User>, UpstreamError> {
        let users = self.select_users(&[("id", user_id.to_string())]).await?;
        Ok(users.into_iter().next())
    }

    /// 局部更新 progress 字段，200/204 之外的状态都视为写入失败
    ///
    /// 不检查用户是否存在，id 不存在时接口同样返回成功
    pub async fn update_progress(&self, user_id: i64, progress: i64) -> Result<(), UpstreamError> {
        let response = self
            .users_request(Method::PATCH)
            .query(&[("id", format!("eq.{}", user_id))])
            .header("Prefer", "return=minimal")
            .json(&json!({ "progress": progress }))
            .send()
            .await
            .map_err(|err| {
                tracing::error!("store update progress request error:{}", err.to_string());
                UpstreamError::WriteRejected("Progress not saved".to_string())
            })?;

        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            status => {
                tracing::error!(
                    "store update progress rejected, user_id:{} status:{}",
                    user_id,
                    status
                );
                Err(UpstreamError::WriteRejected("Progress not saved".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> StoreClient {
        StoreClient::new(
            &Client::new(),
            &StoreConfig {
                url: server.base_url(),
                api_key: "anon-key".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn find_by_username_sends_equality_filter() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/v1/users")
                    .query_param("username", "eq.alice")
                    .query_param("select", "*")
                    .header("apikey", "anon-key")
                    .header("authorization", "Bearer anon-key");
                then.status(200).json_body(json!([
                    {"id": 3, "username": "alice", "password": "pw", "banned": false, "progress": 12}
                ]));
            })
            .await;

        let user = client(&server)
            .find_user_by_username("alice")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(user.id, 3);
        assert_eq!(user.progress(), 12);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_result_is_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/v1/users").query_param("id", "eq.99");
                then.status(200).json_body(json!([]));
            })
            .await;

        assert!(client(&server).find_user_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unexpected_status_is_upstream_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/v1/users");
                then.status(401).body("{\"message\":\"Invalid API key\"}");
            })
            .await;

        let err = client(&server).find_user_by_id(1).await.unwrap_err();
        assert!(matches!(
            err,
            UpstreamError::UnexpectedStatus { status: 401, .. }
        ));
    }

    #[tokio::test]
    async fn update_progress_accepts_no_content() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/rest/v1/users")
                    .query_param("id", "eq.5")
                    .json_body(json!({"progress": 42}));
                then.status(204);
            })
            .await;

        client(&server).update_progress(5, 42).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_progress_rejection_is_write_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(PATCH).path("/rest/v1/users");
                then.status(400);
            })
            .await;

        let err = client(&server).update_progress(5, 1).await.unwrap_err();
        assert!(matches!(err, UpstreamError::WriteRejected(_)));
    }
}
