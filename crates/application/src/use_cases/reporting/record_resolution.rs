use crate::ports::ResolutionLogRepository;
use dnswatch_domain::{DomainError, ResolutionReport};
use std::sync::Arc;
use tracing::info;

pub struct RecordResolutionUseCase {
    repository: Arc<dyn ResolutionLogRepository>,
}

impl RecordResolutionUseCase {
    pub fn new(repository: Arc<dyn ResolutionLogRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, report: ResolutionReport) -> Result<(), DomainError> {
        if report.hostname.trim().is_empty() {
            return Err(DomainError::ReportingError(
                "hostname cannot be empty".to_string(),
            ));
        }

        info!(
            hostname = %report.hostname,
            ips = ?report.ips,
            timestamp = %report.timestamp,
            "DNS resolution recorded"
        );
        self.repository.record(report).await
    }
}
