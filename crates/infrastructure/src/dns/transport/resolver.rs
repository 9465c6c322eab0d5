use dnswatch_domain::{DomainError, UpstreamTarget};
use std::net::SocketAddr;
use std::time::Duration;

/// Resolves an upstream target to its first socket address.
///
/// IP literals are returned without a lookup.
pub async fn resolve_target(
    target: &UpstreamTarget,
    timeout: Duration,
) -> Result<SocketAddr, DomainError> {
    if let Some(addr) = target.socket_addr() {
        return Ok(addr);
    }

    let lookup = (target.host.as_str(), target.port);
    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host(lookup))
        .await
        .map_err(|_| {
            DomainError::ConfigError(format!("Timed out resolving upstream {}", target))
        })?
        .map_err(|e| {
            DomainError::ConfigError(format!("Failed to resolve upstream {}: {}", target, e))
        })?;

    addrs.next().ok_or_else(|| {
        DomainError::ConfigError(format!("No addresses found for upstream {}", target))
    })
}

pub async fn resolve_all(
    targets: &[UpstreamTarget],
    timeout: Duration,
) -> Result<Vec<SocketAddr>, DomainError> {
    let mut resolved = Vec::with_capacity(targets.len());
    for target in targets {
        resolved.push(resolve_target(target, timeout).await?);
    }
    Ok(resolved)
}
