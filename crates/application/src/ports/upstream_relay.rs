use async_trait::async_trait;
use dnswatch_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RelayResponse {
    /// The upstream datagram exactly as received.
    pub bytes: Vec<u8>,
    pub server: SocketAddr,
}

#[async_trait]
pub trait UpstreamRelay: Send + Sync {
    /// Sends `query` to one upstream and waits at most `timeout` for its reply.
    ///
    /// A single call never retries; successive calls may pick different
    /// upstreams.
    async fn relay(&self, query: &[u8], timeout: Duration) -> Result<RelayResponse, DomainError>;
}
