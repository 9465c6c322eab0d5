use crate::dns::transport::resolver::resolve_all;
use crate::dns::transport::{DnsTransport, UdpTransport};
use async_trait::async_trait;
use dnswatch_application::ports::{RelayResponse, UpstreamRelay};
use dnswatch_domain::{DomainError, UpstreamTarget};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, info};

/// Hands out indices `0, 1, .., n-1, 0, ..` across all callers.
pub struct RoundRobinSelector {
    counter: AtomicUsize,
}

impl RoundRobinSelector {
    pub fn new() -> Self {
        Self {
            counter: AtomicUsize::new(0),
        }
    }

    pub fn next_index(&self, server_count: usize) -> usize {
        self.counter.fetch_add(1, Ordering::Relaxed) % server_count
    }
}

impl Default for RoundRobinSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Relays each query to exactly one upstream, rotating per call.
pub struct RoundRobinRelay {
    transports: Vec<Box<dyn DnsTransport>>,
    selector: RoundRobinSelector,
}

impl RoundRobinRelay {
    pub fn new(transports: Vec<Box<dyn DnsTransport>>) -> Result<Self, DomainError> {
        if transports.is_empty() {
            return Err(DomainError::NoUpstreamServers);
        }
        Ok(Self {
            transports,
            selector: RoundRobinSelector::new(),
        })
    }

    pub fn from_addrs(addrs: &[SocketAddr]) -> Result<Self, DomainError> {
        Self::new(
            addrs
                .iter()
                .map(|addr| Box::new(UdpTransport::new(*addr)) as Box<dyn DnsTransport>)
                .collect(),
        )
    }

    /// Resolves configured upstream hostnames once, then builds the relay.
    pub async fn from_targets(
        targets: &[UpstreamTarget],
        resolve_timeout: Duration,
    ) -> Result<Self, DomainError> {
        let addrs = resolve_all(targets, resolve_timeout).await?;
        for (target, addr) in targets.iter().zip(&addrs) {
            info!(upstream = %target, resolved = %addr, "Upstream server configured");
        }
        Self::from_addrs(&addrs)
    }

    pub fn servers(&self) -> Vec<SocketAddr> {
        self.transports.iter().map(|t| t.server_addr()).collect()
    }
}

#[async_trait]
impl UpstreamRelay for RoundRobinRelay {
    async fn relay(&self, query: &[u8], timeout: Duration) -> Result<RelayResponse, DomainError> {
        let index = self.selector.next_index(self.transports.len());
        let transport = &self.transports[index];
        debug!(
            strategy = "round_robin",
            index,
            server = %transport.server_addr(),
            protocol = transport.protocol_name(),
            "Relaying query"
        );

        let response = transport.send(query, timeout).await?;
        Ok(RelayResponse {
            bytes: response.bytes,
            server: response.server,
        })
    }
}
