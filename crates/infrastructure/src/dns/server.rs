use dnswatch_application::use_cases::HandleDnsQueryUseCase;
use dnswatch_domain::DomainError;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

/// Largest datagram accepted from a client (the UDP payload limit).
const MAX_DATAGRAM_SIZE: usize = 65535;

/// UDP front end: one receive loop, one task per datagram.
pub struct DnsListener {
    socket: Arc<UdpSocket>,
    use_case: Arc<HandleDnsQueryUseCase>,
    local_addr: SocketAddr,
}

impl DnsListener {
    /// Binds the listening socket. Must be called inside a tokio runtime.
    pub fn bind(addr: SocketAddr, use_case: Arc<HandleDnsQueryUseCase>) -> io::Result<Self> {
        let socket = UdpSocket::from_std(create_udp_socket(addr)?)?;
        let local_addr = socket.local_addr()?;
        Ok(Self {
            socket: Arc::new(socket),
            use_case,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Runs the receive loop on a background task.
    pub fn spawn(self) -> ListenerHandle {
        let shutdown = CancellationToken::new();
        let local_addr = self.local_addr;
        let task = tokio::spawn(self.run(shutdown.clone()));
        ListenerHandle {
            shutdown,
            task,
            local_addr,
        }
    }

    /// Serves until `shutdown` is cancelled, then aborts in-flight requests.
    pub async fn run(self, shutdown: CancellationToken) {
        info!(bind_address = %self.local_addr, "DNS listener ready");

        let mut in_flight: JoinSet<()> = JoinSet::new();
        let mut recv_buf = vec![0u8; MAX_DATAGRAM_SIZE];

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                received = self.socket.recv_from(&mut recv_buf) => match received {
                    Ok((n, client)) => {
                        let datagram = recv_buf[..n].to_vec();
                        let socket = Arc::clone(&self.socket);
                        let use_case = Arc::clone(&self.use_case);
                        in_flight.spawn(handle_datagram(socket, use_case, datagram, client));
                    }
                    // ICMP errors from earlier sends surface here on some platforms
                    Err(e) => warn!(error = %e, "UDP recv error"),
                },
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        if e.is_panic() {
                            error!(error = %e, "DNS request task panicked");
                        }
                    }
                }
            }
        }

        let aborted = in_flight.len();
        in_flight.shutdown().await;
        info!(
            bind_address = %self.local_addr,
            aborted_requests = aborted,
            "DNS listener stopped"
        );
    }
}

async fn handle_datagram(
    socket: Arc<UdpSocket>,
    use_case: Arc<HandleDnsQueryUseCase>,
    datagram: Vec<u8>,
    client: SocketAddr,
) {
    match use_case.execute(&datagram, client).await {
        Ok(outcome) => match socket.send_to(&outcome.response, client).await {
            Ok(sent) => trace!(
                client = %client,
                domain = %outcome.query.name,
                status = outcome.watch.as_str(),
                upstream = %outcome.upstream,
                attempts = outcome.attempts,
                bytes = sent,
                elapsed_us = outcome.elapsed.as_micros() as u64,
                "Response sent"
            ),
            Err(e) => warn!(client = %client, error = %e, "Failed to send response"),
        },
        Err(DomainError::InvalidQuery(reason)) => {
            warn!(client = %client, bytes = datagram.len(), reason = %reason, "Dropping invalid query");
        }
        Err(e) => debug!(client = %client, error = %e, "Query failed, no response sent"),
    }
}

/// Handle to a spawned listener.
pub struct ListenerHandle {
    shutdown: CancellationToken,
    task: JoinHandle<()>,
    local_addr: SocketAddr,
}

impl ListenerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Cancels the loop and in-flight requests; returns once the listening
    /// socket is closed.
    pub async fn stop(self) {
        self.shutdown.cancel();
        if let Err(e) = self.task.await {
            error!(error = %e, "DNS listener task failed");
        }
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> io::Result<std::net::UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    Ok(socket.into())
}
