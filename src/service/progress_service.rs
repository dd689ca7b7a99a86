use crate::error::api_error::ApiError;
use crate::error::user_error::UserError;
use crate::repository::sheet_repository::SheetRepositoryTrait;
use crate::repository::user_repository::UserRepositoryTrait;
use std::sync::Arc;

/// 进度同步到表格的结果，不影响保存接口的返回
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MirrorOutcome {
    Written { sheet_row: u32 },
    /// 未配置表格
    Disabled,
    /// 表格中找不到该用户
    UserRowMissing,
    Failed(String),
}

#[derive(Clone)]
pub struct ProgressService {
    user_repo: Arc<dyn UserRepositoryTrait>,
    sheet_repo: Option<Arc<dyn SheetRepositoryTrait>>,
}

impl ProgressService {
    pub fn new(
        user_repo: &Arc<dyn UserRepositoryTrait>,
        sheet_repo: &Option<Arc<dyn SheetRepositoryTrait>>,
    ) -> Self {
        Self {
            user_repo: Arc::clone(user_repo),
            sheet_repo: sheet_repo.clone(),
        }
    }

    /// 保存进度到数据库，之后尽力同步到表格
    ///
    /// 数据库写入成功后表格同步失败只记录日志，两边的数据可能不一致
    pub async fn save_progress(&self, user_id: i64, progress: i64) -> Result<MirrorOutcome, ApiError> {
        if let Err(err) = self.user_repo.update_progress(user_id, progress).await {
            tracing::error!(
                "save progress error, user_id:{} error:{}",
                user_id,
                err.to_string()
            );
            Err(err)?
        }

        let outcome = self.mirror_progress(user_id, progress).await;
        match &outcome {
            MirrorOutcome::Written { sheet_row } => {
                tracing::debug!("progress mirrored, user_id:{} row:{}", user_id, sheet_row)
            }
            MirrorOutcome::Disabled => {}
            MirrorOutcome::UserRowMissing => {
                tracing::warn!("progress not mirrored, user_id:{} not in sheet", user_id)
            }
            MirrorOutcome::Failed(reason) => tracing::warn!(
                "progress mirror failed, store and sheet may diverge, user_id:{} error:{}",
                user_id,
                reason
            ),
        }
        Ok(outcome)
    }

    async fn mirror_progress(&self, user_id: i64, progress: i64) -> MirrorOutcome {
        let sheet_repo = match &self.sheet_repo {
            Some(sheet_repo) => sheet_repo,
            None => return MirrorOutcome::Disabled,
        };
        let sheet_row = match sheet_repo.find_user_row(user_id).await {
            Ok(Some(row)) => row,
            Ok(None) => return MirrorOutcome::UserRowMissing,
            Err(err) => return MirrorOutcome::Failed(err.to_string()),
        };
        match sheet_repo.write_progress(sheet_row, progress).await {
            Ok(()) => MirrorOutcome::Written { sheet_row },
            Err(err) => MirrorOutcome::Failed(err.to_string()),
        }
    }

    pub async fn get_progress(&self, user_id: i64) -> Result<i64, ApiError> {
        match self.user_repo.find_by_id(user_id).await {
            Ok(Some(user)) => Ok(user.progress()),
            Ok(None) => Err(UserError::UserNotFound)?,
            Err(err) => {
                tracing::error!("get progress error, user_id:{} error:{}", user_id, err.to_string());
                Err(err)?
            }
        }
    }
}
