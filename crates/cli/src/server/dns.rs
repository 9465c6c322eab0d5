use dnswatch_application::use_cases::HandleDnsQueryUseCase;
use dnswatch_infrastructure::dns::{DnsListener, ListenerHandle};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub fn start_dns_server(
    bind_addr: SocketAddr,
    use_case: Arc<HandleDnsQueryUseCase>,
) -> anyhow::Result<ListenerHandle> {
    info!(bind_address = %bind_addr, "Starting DNS server");

    let listener = DnsListener::bind(bind_addr, use_case)
        .map_err(|e| anyhow::anyhow!("Failed to bind DNS socket on {}: {}", bind_addr, e))?;

    Ok(listener.spawn())
}
