use crate::config::app_config::RowOffsets;
use crate::repository::sheet_repository::SheetRepositoryTrait;
use crate::repository::user_repository::UserRepositoryTrait;
use crate::service::call_list_service::CallListService;
use std::sync::Arc;

#[derive(Clone)]
pub struct CallListState {
    pub call_list_service: Arc<CallListService>,
}

impl CallListState {
    pub fn new(
        user_repo: &Arc<dyn UserRepositoryTrait>,
        sheet_repo: &Option<Arc<dyn SheetRepositoryTrait>>,
        offsets: RowOffsets,
    ) -> Self {
        Self {
            call_list_service: Arc::new(CallListService::new(user_repo, sheet_repo, offsets)),
        }
    }
}
