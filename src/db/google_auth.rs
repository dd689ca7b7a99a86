//! 表格接口的访问令牌
//!
//! 服务账号用私钥签发 RS256 断言，换取访问令牌后缓存到过期前一分钟
use crate::error::upstream_error::UpstreamError;
use crate::utils::encrypt;
use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::RwLock;

const SERVICE: &str = "token";
const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
// 提前刷新的秒数
const REFRESH_MARGIN_SECS: i64 = 60;

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// 服务账号凭证 (JSON 格式，只取用到的字段)
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountKey {
    /// 支持原始 JSON 或 base64 编码后的 JSON
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        let json = if trimmed.starts_with('{') {
            trimmed.to_string()
        } else {
            encrypt::base64_decode(trimmed)?
        };
        serde_json::from_str::<ServiceAccountKey>(&json).map_err(|err| err.to_string())
    }
}

#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, UpstreamError>;
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    expires_at: i64,
}

pub struct ServiceAccountTokenProvider {
    http: Client,
    key: ServiceAccountKey,
    cached: RwLock<Option<CachedToken>>,
}

impl ServiceAccountTokenProvider {
    pub fn new(http: &Client, key: &ServiceAccountKey) -> Self {
        Self {
            http: http.clone(),
            key: key.clone(),
            cached: RwLock::new(None),
        }
    }

    fn sign_assertion(&self, now: i64) -> Result<String, UpstreamError> {
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SPREADSHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        let key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|err| UpstreamError::Token(format!("invalid private key: {}", err)))?;
        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|err| UpstreamError::Token(err.to_string()))
    }

    async fn request_token(&self, now: i64) -> Result<CachedToken, UpstreamError> {
        let assertion = self.sign_assertion(now)?;
        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|source| UpstreamError::Request {
                service: SERVICE,
                source,
            })?;

        if response.status() != StatusCode::OK {
            return Err(UpstreamError::UnexpectedStatus {
                service: SERVICE,
                status: response.status().as_u16(),
            });
        }

        let body = response
            .json::<TokenResponse>()
            .await
            .map_err(|err| UpstreamError::Decode {
                service: SERVICE,
                reason: err.to_string(),
            })?;

        Ok(CachedToken {
            token: body.access_token,
            expires_at: now + body.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS),
        })
    }

    fn usable(cached: &Option<CachedToken>, now: i64) -> Option<String> {
        cached
            .as_ref()
            .filter(|token| token.expires_at - REFRESH_MARGIN_SECS > now)
            .map(|token| token.token.clone())
    }
}

#[async_trait]
impl TokenProvider for ServiceAccountTokenProvider {
    async fn access_token(&self) -> Result<String, UpstreamError> {
        let now = chrono::Utc::now().timestamp();
        if let Some(token) = Self::usable(&*self.cached.read().await, now) {
            return Ok(token);
        }

        let mut guard = self.cached.write().await;
        // 其他请求可能已经刷新过
        if let Some(token) = Self::usable(&*guard, now) {
            return Ok(token);
        }
        tracing::debug!("requesting spreadsheet access token for {}", self.key.client_email);
        let fresh = self.request_token(now).await?;
        let token = fresh.token.clone();
        *guard = Some(fresh);
        Ok(token)
    }
}
