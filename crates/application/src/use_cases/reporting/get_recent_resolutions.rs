use crate::ports::ResolutionLogRepository;
use dnswatch_domain::{DomainError, ResolutionReport};
use std::sync::Arc;

pub struct GetRecentResolutionsUseCase {
    repository: Arc<dyn ResolutionLogRepository>,
}

impl GetRecentResolutionsUseCase {
    pub fn new(repository: Arc<dyn ResolutionLogRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, limit: Option<usize>) -> Result<Vec<ResolutionReport>, DomainError> {
        self.repository.get_recent(limit).await
    }
}
