use crate::config::app_config::RowOffsets;
use crate::config::parameter::{DEFAULT_CALLED_REMARK, NAME_COLUMN, PHONE_COLUMN};
use crate::dto::call_list_dto::{NextNumber, NextRecord, NextRes};
use crate::error::api_error::ApiError;
use crate::error::call_list_error::CallListError;
use crate::error::upstream_error::UpstreamError;
use crate::error::user_error::UserError;
use crate::model::call_record::CallRecord;
use crate::model::user::User;
use crate::repository::sheet_repository::SheetRepositoryTrait;
use crate::repository::user_repository::UserRepositoryTrait;
use std::sync::Arc;

/// 进度转换为数据下标，负数按0处理，超出范围返回 None
fn data_index(progress: i64) -> Option<u32> {
    u32::try_from(progress.max(0)).ok()
}

// column 从1开始
fn cell(row: &[String], column: u32) -> String {
    row.get(column as usize - 1)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

#[derive(Clone)]
pub struct CallListService {
    user_repo: Arc<dyn UserRepositoryTrait>,
    sheet_repo: Option<Arc<dyn SheetRepositoryTrait>>,
    offsets: RowOffsets,
}

impl CallListService {
    pub fn new(
        user_repo: &Arc<dyn UserRepositoryTrait>,
        sheet_repo: &Option<Arc<dyn SheetRepositoryTrait>>,
        offsets: RowOffsets,
    ) -> Self {
        Self {
            user_repo: Arc::clone(user_repo),
            sheet_repo: sheet_repo.clone(),
            offsets,
        }
    }

    fn sheet(&self) -> Result<&Arc<dyn SheetRepositoryTrait>, UpstreamError> {
        self.sheet_repo
            .as_ref()
            .ok_or(UpstreamError::SheetNotConfigured)
    }

    async fn user(&self, user_id: i64) -> Result<User, ApiError> {
        match self.user_repo.find_by_id(user_id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(UserError::UserNotFound)?,
            Err(err) => {
                tracing::error!("find user error, user_id:{} error:{}", user_id, err.to_string());
                Err(err)?
            }
        }
    }

    /// 读取数据下标对应的行，超出列表返回 None
    async fn row_at(&self, index: u32, offset: u32) -> Result<Option<Vec<String>>, ApiError> {
        let sheet_row = match index.checked_add(offset) {
            Some(row) => row,
            None => return Ok(None),
        };
        Ok(self.sheet()?.row(sheet_row).await?)
    }

    /// 根据用户当前进度返回下一条记录
    pub async fn next_for_user(&self, user_id: i64) -> Result<NextRes<NextRecord>, ApiError> {
        self.sheet()?;
        let user = self.user(user_id).await?;
        let index = match data_index(user.progress()) {
            Some(index) => index,
            None => return Ok(NextRes::done()),
        };
        match self.row_at(index, self.offsets.next).await? {
            Some(row) => Ok(NextRes::Found(NextRecord {
                index,
                name: cell(&row, NAME_COLUMN),
                phone: cell(&row, PHONE_COLUMN),
            })),
            None => Ok(NextRes::done()),
        }
    }

    /// 按下标返回电话号码
    pub async fn next_number(&self, row: u32) -> Result<NextRes<NextNumber>, ApiError> {
        match self.row_at(row, self.offsets.next).await? {
            Some(cells) => Ok(NextRes::Found(NextNumber {
                number: cell(&cells, PHONE_COLUMN),
            })),
            None => Ok(NextRes::done()),
        }
    }

    /// 写入当前记录的备注，然后进度加一，返回新的进度
    ///
    /// 备注写入失败时不推进进度
    pub async fn save_remark(&self, user_id: i64, remark: &str) -> Result<i64, ApiError> {
        let sheet = self.sheet()?;
        let user = self.user(user_id).await?;
        let progress = user.progress().max(0);
        let index = data_index(progress).ok_or(CallListError::RowOutOfRange(u32::MAX))?;
        let sheet_row = index
            .checked_add(self.offsets.remark)
            .ok_or(CallListError::RowOutOfRange(index))?;
        if sheet.row(sheet_row).await?.is_none() {
            Err(CallListError::RowOutOfRange(index))?
        }

        if let Err(err) = sheet.write_remark(sheet_row, remark).await {
            tracing::error!(
                "write remark error, user_id:{} row:{} error:{}",
                user_id,
                sheet_row,
                err.to_string()
            );
            Err(UpstreamError::WriteRejected("Remark not saved".to_string()))?
        }

        let next = progress + 1;
        if let Err(err) = self.user_repo.update_progress(user_id, next).await {
            tracing::error!(
                "advance progress error, remark already written, user_id:{} row:{} error:{}",
                user_id,
                sheet_row,
                err.to_string()
            );
            Err(err)?
        }
        Ok(next)
    }

    /// 标记某一行已拨打，`remark` 为空时写入默认状态
    pub async fn mark_called(&self, row: u32, remark: Option<&str>) -> Result<(), ApiError> {
        let sheet = self.sheet()?;
        let sheet_row = row
            .checked_add(self.offsets.remark)
            .ok_or(CallListError::RowOutOfRange(row))?;
        if sheet.row(sheet_row).await?.is_none() {
            Err(CallListError::RowOutOfRange(row))?
        }
        let remark = remark
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_CALLED_REMARK);
        if let Err(err) = sheet.write_remark(sheet_row, remark).await {
            tracing::error!("mark called error, row:{} error:{}", row, err.to_string());
            Err(UpstreamError::WriteRejected("Row not updated".to_string()))?
        }
        Ok(())
    }

    pub async fn numbers(&self, start: u32, limit: u32) -> Result<Vec<CallRecord>, ApiError> {
        Ok(self.sheet()?.records(start, limit).await?)
    }

    pub async fn sheet_rows(&self) -> Result<Vec<Vec<String>>, ApiError> {
        Ok(self.sheet()?.all_rows().await?)
    }
}
