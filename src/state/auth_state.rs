use crate::repository::sheet_repository::SheetRepositoryTrait;
use crate::repository::user_repository::UserRepositoryTrait;
use crate::service::auth_service::AuthService;
use crate::utils::encrypt::PasswordScheme;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthState {
    pub auth_service: Arc<AuthService>,
}

impl AuthState {
    pub fn new(
        user_repo: &Arc<dyn UserRepositoryTrait>,
        sheet_repo: &Option<Arc<dyn SheetRepositoryTrait>>,
        password_scheme: PasswordScheme,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(user_repo, sheet_repo, password_scheme)),
        }
    }
}
