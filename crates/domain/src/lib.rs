//! dnswatch domain layer
pub mod config;
pub mod correlation;
pub mod dns_message;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod resolution;
pub mod watch_pattern;

pub use config::{
    CliOverrides, Config, ConfigError, DnsConfig, LogFormat, LoggingConfig, ReportingConfig,
    ServerConfig, SidecarConfig, UpstreamTarget, WatchConfig,
};
pub use correlation::CorrelationEntry;
pub use dns_message::{wire, Answer, AnswerData, MessageFlags, ResolvedMessage};
pub use dns_query::{Query, Question};
pub use dns_record::{RecordClass, RecordType};
pub use errors::DomainError;
pub use resolution::ResolutionReport;
pub use watch_pattern::{HostnameMatcher, WatchPattern};
