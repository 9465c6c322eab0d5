//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). Every call binds its own ephemeral
//! socket and drops it when the exchange ends, so a late reply can never be
//! read by another query.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use dnswatch_domain::{wire, DomainError};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Largest UDP payload; a smaller buffer would silently cut EDNS(0) replies.
const MAX_UDP_RESPONSE_SIZE: usize = 65535;

/// DNS over UDP transport
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn socket_error(&self, reason: impl Into<String>) -> DomainError {
        DomainError::UpstreamSocketError {
            server: self.server_addr.to_string(),
            reason: reason.into(),
        }
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.socket_error(format!("bind failed: {}", e)))?;

        let bytes_sent = socket
            .send_to(message_bytes, self.server_addr)
            .await
            .map_err(|e| self.socket_error(format!("send failed: {}", e)))?;

        debug!(
            server = %self.server_addr,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let (bytes_received, from_addr) = socket
            .recv_from(&mut recv_buf)
            .await
            .map_err(|e| self.socket_error(format!("receive failed: {}", e)))?;
        recv_buf.truncate(bytes_received);

        // Validate response came from expected server
        if from_addr != self.server_addr {
            warn!(
                expected = %self.server_addr,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
            return Err(self.socket_error(format!("reply from unexpected source {}", from_addr)));
        }

        if let Some(query_id) = wire::peek_id(message_bytes) {
            let reply_id = wire::peek_id(&recv_buf);
            if reply_id != Some(query_id) {
                warn!(
                    server = %self.server_addr,
                    query_id,
                    reply_id = ?reply_id,
                    "UDP response with mismatched transaction id"
                );
                return Err(self.socket_error(format!(
                    "reply id {:?} does not match query id {}",
                    reply_id, query_id
                )));
            }
        }

        debug!(
            server = %self.server_addr,
            bytes_received = bytes_received,
            "UDP response received"
        );

        Ok(recv_buf)
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    /// One send and one receive, both within `timeout`.
    ///
    /// On expiry the exchange future is dropped, which closes its socket.
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let bytes = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| DomainError::UpstreamTimeout {
                server: self.server_addr.to_string(),
            })??;

        Ok(TransportResponse {
            bytes,
            server: self.server_addr,
        })
    }

    fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
