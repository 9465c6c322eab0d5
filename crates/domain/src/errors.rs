use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed DNS message: {0}")]
    MalformedMessage(String),

    #[error("Cannot encode DNS message: {0}")]
    UnencodableMessage(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Upstream timeout waiting for {server}")]
    UpstreamTimeout { server: String },

    #[error("Upstream socket error with {server}: {reason}")]
    UpstreamSocketError { server: String, reason: String },

    #[error("Malformed upstream response: {0}")]
    MalformedUpstreamResponse(String),

    #[error("No upstream servers available")]
    NoUpstreamServers,

    #[error("Invalid watch pattern: {0}")]
    InvalidWatchPattern(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Reporting error: {0}")]
    ReportingError(String),
}

impl DomainError {
    /// Relay failures that the request handler may retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::UpstreamTimeout { .. } | DomainError::UpstreamSocketError { .. }
        )
    }
}
