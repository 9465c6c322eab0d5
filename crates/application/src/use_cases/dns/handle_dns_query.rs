use crate::ports::{CorrelationStore, RelayResponse, ResolutionReporter, UpstreamRelay};
use dnswatch_domain::{
    wire, DnsConfig, DomainError, HostnameMatcher, Query, ResolutionReport, ResolvedMessage,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, trace, warn};

/// Timeout and attempt budget applied to every relayed query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayPolicy {
    pub timeout: Duration,
    /// Total attempts, the first one included. Never below 1.
    pub attempts: u32,
}

impl RelayPolicy {
    pub fn new(timeout: Duration, attempts: u32) -> Self {
        Self {
            timeout,
            attempts: attempts.max(1),
        }
    }

    pub fn from_config(config: &DnsConfig) -> Self {
        Self::new(
            Duration::from_millis(config.query_timeout),
            config.retry_attempts,
        )
    }
}

impl Default for RelayPolicy {
    fn default() -> Self {
        Self::from_config(&DnsConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchStatus {
    /// The queried name is on the watch-list.
    Matched,
    /// The queried name is a CNAME target previously reached from each of
    /// `origins`, most recent first. Never empty.
    Correlated { origins: Vec<Arc<str>> },
    Unmatched,
}

impl WatchStatus {
    pub fn is_watched(&self) -> bool {
        !matches!(self, WatchStatus::Unmatched)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WatchStatus::Matched => "matched",
            WatchStatus::Correlated { .. } => "correlated",
            WatchStatus::Unmatched => "unmatched",
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryOutcome {
    /// Upstream reply bytes, unmodified.
    pub response: Vec<u8>,
    pub query: Query,
    pub watch: WatchStatus,
    pub upstream: SocketAddr,
    pub attempts: u32,
    pub elapsed: Duration,
}

pub struct HandleDnsQueryUseCase {
    relay: Arc<dyn UpstreamRelay>,
    matcher: HostnameMatcher,
    correlations: Arc<dyn CorrelationStore>,
    policy: RelayPolicy,
    reporter: Option<Arc<dyn ResolutionReporter>>,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        relay: Arc<dyn UpstreamRelay>,
        matcher: HostnameMatcher,
        correlations: Arc<dyn CorrelationStore>,
        policy: RelayPolicy,
    ) -> Self {
        Self {
            relay,
            matcher,
            correlations,
            policy,
            reporter: None,
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ResolutionReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn classify(&self, name: &str) -> WatchStatus {
        if self.matcher.is_matched_hostname(name) {
            WatchStatus::Matched
        } else {
            let origins = self.correlations.correlated_origins(name);
            if origins.is_empty() {
                WatchStatus::Unmatched
            } else {
                WatchStatus::Correlated { origins }
            }
        }
    }

    /// Forwards `datagram` upstream and returns the reply untouched.
    ///
    /// The reply is decoded only to log watched resolutions and record their
    /// CNAME targets; a reply that fails to decode is still returned.
    pub async fn execute(
        &self,
        datagram: &[u8],
        client: SocketAddr,
    ) -> Result<QueryOutcome, DomainError> {
        let start = Instant::now();

        let message =
            wire::decode(datagram).map_err(|e| DomainError::InvalidQuery(e.to_string()))?;
        let query = message
            .first_query()
            .ok_or_else(|| DomainError::InvalidQuery("message carries no question".to_string()))?;

        debug!(
            domain = %query.name,
            record_type = %query.record_type,
            client = %client,
            id = query.id,
            "Query received"
        );
        if message.questions.len() > 1 {
            debug!(
                domain = %query.name,
                questions = message.questions.len(),
                "Only the first question is inspected, forwarding all"
            );
        }

        let watch = self.classify(&query.name);
        let (response, attempts) = self.relay_with_retries(datagram, &query).await?;

        self.observe(&query, &watch, &response);

        Ok(QueryOutcome {
            response: response.bytes,
            query,
            watch,
            upstream: response.server,
            attempts,
            elapsed: start.elapsed(),
        })
    }

    async fn relay_with_retries(
        &self,
        datagram: &[u8],
        query: &Query,
    ) -> Result<(RelayResponse, u32), DomainError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.relay.relay(datagram, self.policy.timeout).await {
                Ok(response) => return Ok((response, attempt)),
                Err(e) if e.is_retryable() && attempt < self.policy.attempts => {
                    warn!(
                        domain = %query.name,
                        attempt,
                        max_attempts = self.policy.attempts,
                        error = %e,
                        "Upstream error, retrying"
                    );
                }
                Err(e) => {
                    error!(
                        domain = %query.name,
                        attempts = attempt,
                        error = %e,
                        "Upstream error"
                    );
                    return Err(e);
                }
            }
        }
    }

    fn observe(&self, query: &Query, watch: &WatchStatus, response: &RelayResponse) {
        trace!(
            domain = %query.name,
            server = %response.server,
            bytes = response.bytes.len(),
            "Upstream response"
        );

        let origins = match watch {
            WatchStatus::Matched => vec![Arc::clone(&query.name)],
            WatchStatus::Correlated { origins } => origins.clone(),
            WatchStatus::Unmatched => {
                debug!(
                    domain = %query.name,
                    record_type = %query.record_type,
                    "Hostname unmatched"
                );
                return;
            }
        };

        let message = match wire::decode(&response.bytes) {
            Ok(message) => message,
            Err(e) => {
                let e = DomainError::MalformedUpstreamResponse(e.to_string());
                warn!(
                    domain = %query.name,
                    server = %response.server,
                    error = %e,
                    "Skipping observation of upstream reply"
                );
                return;
            }
        };

        for origin in &origins {
            self.record_cnames(origin, &message);
        }

        let addresses = message.addresses();
        let cnames: Vec<&str> = message
            .cname_answers()
            .filter_map(|a| a.cname_target())
            .collect();
        info!(
            domain = %query.name,
            origins = ?origins,
            status = watch.as_str(),
            record_type = %query.record_type,
            rcode = message.flags.rcode_str(),
            addresses = ?addresses,
            cname = ?cnames,
            "Hostname matched"
        );

        if let Some(reporter) = &self.reporter {
            for origin in &origins {
                let reporter = Arc::clone(reporter);
                let report = ResolutionReport::new(origin.as_ref(), &addresses);
                tokio::spawn(async move {
                    if let Err(e) = reporter.report(&report).await {
                        warn!(error = %e, hostname = %report.hostname, "Failed to report resolution");
                    }
                });
            }
        }
    }

    fn record_cnames(&self, origin: &Arc<str>, message: &ResolvedMessage) {
        for answer in message.cname_answers() {
            let Some(target) = answer.cname_target() else {
                continue;
            };
            self.correlations.record_cname(origin, target, answer.ttl);
            info!(origin = %origin, cname = %target, ttl = answer.ttl, "CNAME chain");
        }
    }
}
