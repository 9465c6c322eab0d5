mod correlation_store;
mod resolution_log_repository;
mod resolution_reporter;
mod upstream_relay;

pub use correlation_store::CorrelationStore;
pub use resolution_log_repository::ResolutionLogRepository;
pub use resolution_reporter::ResolutionReporter;
pub use upstream_relay::{RelayResponse, UpstreamRelay};
