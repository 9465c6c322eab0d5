use clap::Parser;
use dnswatch_domain::{CliOverrides, UpstreamTarget, WatchPattern};
use std::net::{IpAddr, SocketAddr};
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "dnswatch")]
#[command(version)]
#[command(about = "dnswatch - transparent DNS forwarder that logs watched hostnames")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS listen port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream server, replaces the configured list (repeatable)
    #[arg(short = 'u', long = "upstream", value_name = "HOST[:PORT]")]
    upstreams: Vec<UpstreamTarget>,

    /// Extra watch pattern, e.g. "*.example.com" (repeatable)
    #[arg(short = 'w', long = "watch", value_name = "PATTERN")]
    watch: Vec<WatchPattern>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Start the reporting sidecar
    #[arg(long)]
    sidecar: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        upstreams: cli.upstreams,
        watch_patterns: cli.watch,
        log_level: cli.log_level,
        sidecar: cli.sidecar,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting dnswatch v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config).await?;
    let reporting = di::ReportingServices::new(&config);

    let bind_ip: IpAddr = config.server.bind_address.parse().map_err(|_| {
        anyhow::anyhow!("Invalid bind address '{}'", config.server.bind_address)
    })?;
    let dns_addr = SocketAddr::new(bind_ip, config.server.dns_port);
    let listener = server::start_dns_server(dns_addr, dns_services.handler_use_case)?;

    let sidecar = if config.reporting.sidecar.enabled {
        let sidecar_ip: IpAddr = config.reporting.sidecar.bind_address.parse().map_err(|_| {
            anyhow::anyhow!(
                "Invalid sidecar bind address '{}'",
                config.reporting.sidecar.bind_address
            )
        })?;
        let web_addr = SocketAddr::new(sidecar_ip, config.reporting.sidecar.port);
        let shutdown = listener.shutdown_token();
        let state = reporting.app_state();
        Some(tokio::spawn(async move {
            if let Err(e) = server::start_web_server(web_addr, state, shutdown).await {
                error!(error = %e, "Sidecar server error");
            }
        }))
    } else {
        None
    };

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");

    listener.stop().await;
    if let Some(sidecar) = sidecar {
        if let Err(e) = sidecar.await {
            error!(error = %e, "Sidecar task failed");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
