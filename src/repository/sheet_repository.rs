use crate::config::app_config::SheetConfig;
use crate::config::parameter::{HEADER_ROWS, NAME_COLUMN, REMARK_COLUMN};
use crate::db::sheets::{a1_cell, a1_column, a1_columns, SheetsClient};
use crate::error::upstream_error::UpstreamError;
use crate::model::call_record::CallRecord;
use async_trait::async_trait;
use serde_json::Value;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SheetRepositoryTrait: Send + Sync {
    /// 拨号列表的全部原始行 (包含表头)
    async fn all_rows(&self) -> Result<Vec<Vec<String>>, UpstreamError>;

    /// 分页获取拨号记录，`start` 为不含表头的下标
    async fn records(&self, start: u32, limit: u32) -> Result<Vec<CallRecord>, UpstreamError>;

    /// 读取拨号列表中的一行 (表格行号从1开始)
    ///
    /// 超出列表末尾 (最后一个非空行) 返回 None，列表中间的空行返回空记录
    async fn row(&self, sheet_row: u32) -> Result<Option<Vec<String>>, UpstreamError>;

    /// 在进度表的查找列中定位用户id所在的行
    async fn find_user_row(&self, user_id: i64) -> Result<Option<u32>, UpstreamError>;

    /// 写入同步的进度
    async fn write_progress(&self, sheet_row: u32, progress: i64) -> Result<(), UpstreamError>;

    /// 写入备注 / 拨打状态
    async fn write_remark(&self, sheet_row: u32, remark: &str) -> Result<(), UpstreamError>;
}

#[derive(Clone)]
pub struct SheetRepository {
    client: SheetsClient,
    call_list_tab: String,
    progress_tab: String,
    lookup_column: u32,
    mirror_column: u32,
}

impl SheetRepository {
    pub fn new(client: &SheetsClient, config: &SheetConfig) -> Self {
        Self {
            client: client.clone(),
            call_list_tab: config.call_list_tab.clone(),
            progress_tab: config.progress_tab.clone(),
            lookup_column: config.lookup_column,
            mirror_column: config.mirror_column,
        }
    }

    /// 拨号列表的姓名到备注列，按整列读取，去掉末尾的空行
    ///
    /// 列表长度以最后一个非空行为准，中间的空行保留
    async fn list_rows(&self) -> Result<Vec<Vec<String>>, UpstreamError> {
        let range = a1_columns(&self.call_list_tab, NAME_COLUMN, REMARK_COLUMN);
        let mut rows = self.client.get_values(&range).await?;
        let len = rows
            .iter()
            .rposition(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .map(|last| last + 1)
            .unwrap_or(0);
        rows.truncate(len);
        Ok(rows)
    }
}

#[async_trait]
impl SheetRepositoryTrait for SheetRepository {
    async fn all_rows(&self) -> Result<Vec<Vec<String>>, UpstreamError> {
        let range = format!("'{}'", self.call_list_tab.replace('\'', "''"));
        self.client.get_values(&range).await
    }

    async fn records(&self, start: u32, limit: u32) -> Result<Vec<CallRecord>, UpstreamError> {
        if limit == 0 {
            return Ok(vec![]);
        }
        // 超出列表返回空页
        let rows = self.list_rows().await?;
        Ok(rows
            .iter()
            .enumerate()
            .skip((HEADER_ROWS as usize).saturating_add(start as usize))
            .take(limit as usize)
            .filter_map(|(position, row)| {
                let index = u32::try_from(position).ok()?.checked_sub(HEADER_ROWS)?;
                CallRecord::from_row(index, row)
            })
            .collect())
    }

    async fn row(&self, sheet_row: u32) -> Result<Option<Vec<String>>, UpstreamError> {
        if sheet_row == 0 {
            return Ok(None);
        }
        let mut rows = self.list_rows().await?;
        let position = sheet_row as usize - 1;
        if position >= rows.len() {
            return Ok(None);
        }
        Ok(Some(rows.swap_remove(position)))
    }

    async fn find_user_row(&self, user_id: i64) -> Result<Option<u32>, UpstreamError> {
        let needle = user_id.to_string();
        let column = self
            .client
            .get_values(&a1_column(&self.progress_tab, self.lookup_column))
            .await?;
        Ok(column
            .iter()
            .position(|row| row.first().map(|cell| cell.trim() == needle).unwrap_or(false))
            .map(|index| index as u32 + 1))
    }

    async fn write_progress(&self, sheet_row: u32, progress: i64) -> Result<(), UpstreamError> {
        let range = a1_cell(&self.progress_tab, self.mirror_column, sheet_row);
        self.client.update_value(&range, Value::from(progress)).await
    }

    async fn write_remark(&self, sheet_row: u32, remark: &str) -> Result<(), UpstreamError> {
        let range = a1_cell(&self.call_list_tab, REMARK_COLUMN, sheet_row);
        self.client.update_value(&range, Value::from(remark)).await
    }
}
