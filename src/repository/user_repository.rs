use crate::db::store::StoreClient;
use crate::error::upstream_error::UpstreamError;
use crate::model::user::User;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// 按用户名查找
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UpstreamError>;

    /// 按 id 查找
    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, UpstreamError>;

    /// 更新进度，不检查用户是否存在
    async fn update_progress(&self, user_id: i64, progress: i64) -> Result<(), UpstreamError>;
}

#[derive(Clone)]
pub struct UserRepository {
    store: StoreClient,
}

impl UserRepository {
    pub fn new(store: &StoreClient) -> Self {
        Self {
            store: store.clone(),
        }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UpstreamError> {
        self.store.find_user_by_username(username).await
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, UpstreamError> {
        self.store.find_user_by_id(user_id).await
    }

    async fn update_progress(&self, user_id: i64, progress: i64) -> Result<(), UpstreamError> {
        self.store.update_progress(user_id, progress).await
    }
}
