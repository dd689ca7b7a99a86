use crate::repository::sheet_repository::SheetRepositoryTrait;
use crate::repository::user_repository::UserRepositoryTrait;
use crate::service::progress_service::ProgressService;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProgressState {
    pub progress_service: Arc<ProgressService>,
}

impl ProgressState {
    pub fn new(
        user_repo: &Arc<dyn UserRepositoryTrait>,
        sheet_repo: &Option<Arc<dyn SheetRepositoryTrait>>,
    ) -> Self {
        Self {
            progress_service: Arc::new(ProgressService::new(user_repo, sheet_repo)),
        }
    }
}
