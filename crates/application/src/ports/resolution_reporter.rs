use async_trait::async_trait;
use dnswatch_domain::{DomainError, ResolutionReport};

#[async_trait]
pub trait ResolutionReporter: Send + Sync {
    async fn report(&self, report: &ResolutionReport) -> Result<(), DomainError>;
}
