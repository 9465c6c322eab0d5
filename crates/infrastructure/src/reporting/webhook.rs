use async_trait::async_trait;
use dnswatch_application::ports::ResolutionReporter;
use dnswatch_domain::{DomainError, ResolutionReport};
use std::time::Duration;
use tracing::debug;

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);

/// Posts each watched resolution as JSON to a configured URL.
pub struct WebhookReporter {
    url: String,
    http_client: reqwest::Client,
}

impl WebhookReporter {
    pub fn new(url: impl Into<String>) -> Result<Self, DomainError> {
        Self::with_timeout(url, WEBHOOK_TIMEOUT)
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("dnswatch/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::ReportingError(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            http_client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ResolutionReporter for WebhookReporter {
    async fn report(&self, report: &ResolutionReport) -> Result<(), DomainError> {
        let response = self
            .http_client
            .post(&self.url)
            .json(report)
            .send()
            .await
            .map_err(|e| DomainError::ReportingError(format!("POST {} failed: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::ReportingError(format!(
                "POST {} returned {}",
                self.url, status
            )));
        }

        debug!(url = %self.url, hostname = %report.hostname, status = %status, "Resolution reported");
        Ok(())
    }
}
