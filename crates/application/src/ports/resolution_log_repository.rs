use async_trait::async_trait;
use dnswatch_domain::{DomainError, ResolutionReport};

#[async_trait]
pub trait ResolutionLogRepository: Send + Sync {
    async fn record(&self, report: ResolutionReport) -> Result<(), DomainError>;

    /// Most recent first.
    async fn get_recent(&self, limit: Option<usize>) -> Result<Vec<ResolutionReport>, DomainError>;
}
