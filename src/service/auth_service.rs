use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::error::api_error::ApiError;
use crate::error::upstream_error::UpstreamError;
use crate::error::user_error::UserError;
use crate::model::user::User;
use crate::repository::sheet_repository::SheetRepositoryTrait;
use crate::repository::user_repository::UserRepositoryTrait;
use crate::utils::encrypt::{verify_password, PasswordScheme};
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepositoryTrait>,
    sheet_repo: Option<Arc<dyn SheetRepositoryTrait>>,
    password_scheme: PasswordScheme,
}

impl AuthService {
    pub fn new(
        user_repo: &Arc<dyn UserRepositoryTrait>,
        sheet_repo: &Option<Arc<dyn SheetRepositoryTrait>>,
        password_scheme: PasswordScheme,
    ) -> Self {
        Self {
            user_repo: Arc::clone(user_repo),
            sheet_repo: sheet_repo.clone(),
            password_scheme,
        }
    }

    /// 登录，`today` 用于判断账号是否过期
    pub async fn login(
        &self,
        payload: &LoginRequest,
        today: NaiveDate,
    ) -> Result<LoginResponse, ApiError> {
        tracing::info!("login request, username:{}", payload.username);

        let user = match self.user_repo.find_by_username(&payload.username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::info!("login failed, unknown username:{}", payload.username);
                Err(UserError::InvalidCredentials)?
            }
            Err(err) => {
                tracing::error!("find user by username error :{}", err.to_string());
                Err(err)?
            }
        };

        if !verify_password(self.password_scheme, &payload.password, &user.password) {
            tracing::info!("login failed, wrong password, username:{}", payload.username);
            Err(UserError::InvalidCredentials)?
        }

        check_account(&user, today)?;

        let sheet_row = self.lookup_sheet_row(user.id).await;
        Ok(LoginResponse {
            status: "success".to_string(),
            user_id: user.id,
            progress: user.progress(),
            sheet_id: user.sheet_id.clone(),
            sheet_row,
        })
    }

    // 查找失败不影响登录结果
    async fn lookup_sheet_row(&self, user_id: i64) -> Option<u32> {
        let sheet_repo = self.sheet_repo.as_ref()?;
        match sheet_repo.find_user_row(user_id).await {
            Ok(row) => row,
            Err(err) => {
                tracing::warn!(
                    "sheet row lookup failed, user_id:{} error:{}",
                    user_id,
                    err.to_string()
                );
                None
            }
        }
    }
}

/// 检查封禁和过期，过期日当天仍然可以登录
pub fn check_account(user: &User, today: NaiveDate) -> Result<(), ApiError> {
    if user.banned {
        Err(UserError::Banned)?
    }
    match user.expiry_date() {
        Some(Ok(expiry)) if expiry < today => Err(UserError::Expired)?,
        Some(Err(err)) => {
            tracing::error!("user {} has invalid expiry, error:{}", user.id, err);
            Err(UpstreamError::InvalidRecord(format!(
                "expiry of user {} is not a date",
                user.id
            )))?
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::sheet_repository::MockSheetRepositoryTrait;
    use crate::repository::user_repository::MockUserRepositoryTrait;
    use mockall::predicate::eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn alice() -> User {
        User {
            id: 3,
            username: "alice".to_string(),
            password: "secret".to_string(),
            progress: Some(12),
            sheet_id: Some("sheet-a".to_string()),
            ..Default::default()
        }
    }

    fn login_req(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn service(user: Option<User>, sheet: Option<MockSheetRepositoryTrait>) -> AuthService {
        let mut user_repo = MockUserRepositoryTrait::new();
        user_repo
            .expect_find_by_username()
            .returning(move |_| Ok(user.clone()));
        let user_repo: Arc<dyn UserRepositoryTrait> = Arc::new(user_repo);
        let sheet_repo = sheet.map(|s| Arc::new(s) as Arc<dyn SheetRepositoryTrait>);
        AuthService::new(&user_repo, &sheet_repo, PasswordScheme::Plain)
    }

    #[tokio::test]
    async fn valid_credentials_return_progress() {
        let res = service(Some(alice()), None)
            .login(&login_req("alice", "secret"), today())
            .await
            .unwrap();
        assert_eq!(
            res,
            LoginResponse {
                status: "success".to_string(),
                user_id: 3,
                progress: 12,
                sheet_id: Some("sheet-a".to_string()),
                sheet_row: None,
            }
        );
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_look_the_same() {
        let unknown = service(None, None)
            .login(&login_req("nobody", "secret"), today())
            .await
            .unwrap_err();
        let wrong = service(Some(alice()), None)
            .login(&login_req("alice", "guess"), today())
            .await
            .unwrap_err();
        assert!(matches!(unknown, ApiError::UserError(UserError::InvalidCredentials)));
        assert!(matches!(wrong, ApiError::UserError(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn banned_user_is_forbidden_even_with_right_password() {
        let mut user = alice();
        user.banned = true;
        let err = service(Some(user), None)
            .login(&login_req("alice", "secret"), today())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UserError(UserError::Banned)));
    }

    #[test]
    fn expiry_boundary() {
        let mut user = alice();
        user.expiry = Some("2024-06-14".to_string());
        assert!(matches!(
            check_account(&user, today()),
            Err(ApiError::UserError(UserError::Expired))
        ));
        user.expiry = Some("2024-06-15".to_string());
        assert!(check_account(&user, today()).is_ok());
        user.expiry = Some("2025-01-01".to_string());
        assert!(check_account(&user, today()).is_ok());
    }

    #[test]
    fn malformed_expiry_is_server_error() {
        let mut user = alice();
        user.expiry = Some("soon".to_string());
        assert!(matches!(
            check_account(&user, today()),
            Err(ApiError::UpstreamError(UpstreamError::InvalidRecord(_)))
        ));
    }

    #[tokio::test]
    async fn sheet_row_is_attached_when_found() {
        let mut sheet = MockSheetRepositoryTrait::new();
        sheet
            .expect_find_user_row()
            .with(eq(3))
            .returning(|_| Ok(Some(4)));
        let res = service(Some(alice()), Some(sheet))
            .login(&login_req("alice", "secret"), today())
            .await
            .unwrap();
        assert_eq!(res.sheet_row, Some(4));
    }

    #[tokio::test]
    async fn sheet_lookup_failure_does_not_fail_login() {
        let mut sheet = MockSheetRepositoryTrait::new();
        sheet
            .expect_find_user_row()
            .returning(|_| Err(UpstreamError::Token("expired".to_string())));
        let res = service(Some(alice()), Some(sheet))
            .login(&login_req("alice", "secret"), today())
            .await
            .unwrap();
        assert_eq!(res.status, "success");
        assert_eq!(res.sheet_row, None);
    }

    #[tokio::test]
    async fn store_failure_is_propagated() {
        let mut user_repo = MockUserRepositoryTrait::new();
        user_repo.expect_find_by_username().returning(|_| {
            Err(UpstreamError::UnexpectedStatus {
                service: "store",
                status: 503,
            })
        });
        let user_repo: Arc<dyn UserRepositoryTrait> = Arc::new(user_repo);
        let err = AuthService::new(&user_repo, &None, PasswordScheme::Plain)
            .login(&login_req("alice", "secret"), today())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::UpstreamError(UpstreamError::UnexpectedStatus { status: 503, .. })
        ));
    }
}
