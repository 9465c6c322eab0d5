pub mod dns;
pub mod errors;
pub mod logging;
pub mod reporting;
pub mod root;
pub mod server;
pub mod upstream;
pub mod watch;

pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use reporting::{ReportingConfig, SidecarConfig};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use upstream::UpstreamTarget;
pub use watch::WatchConfig;
