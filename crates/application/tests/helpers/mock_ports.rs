use async_trait::async_trait;
use dnswatch_application::ports::{
    CorrelationStore, RelayResponse, ResolutionLogRepository, ResolutionReporter, UpstreamRelay,
};
use dnswatch_domain::{DomainError, ResolutionReport};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const UPSTREAM: &str = "192.0.2.53:53";

// ── UpstreamRelay ──────────────────────────────────────────────────────────

/// Replays queued replies in order; an empty queue behaves like a timeout.
pub struct MockUpstreamRelay {
    replies: Mutex<VecDeque<Result<Vec<u8>, DomainError>>>,
    seen: Mutex<Vec<(Vec<u8>, Duration)>>,
    calls: AtomicUsize,
    server: SocketAddr,
}

impl MockUpstreamRelay {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            seen: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            server: UPSTREAM.parse().unwrap(),
        }
    }

    pub fn push_reply(&self, bytes: Vec<u8>) {
        self.replies.lock().unwrap().push_back(Ok(bytes));
    }

    pub fn push_timeout(&self) {
        let server = self.server.to_string();
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(DomainError::UpstreamTimeout { server }));
    }

    pub fn push_error(&self, error: DomainError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_queries(&self) -> Vec<Vec<u8>> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|(q, _)| q.clone())
            .collect()
    }

    pub fn seen_timeouts(&self) -> Vec<Duration> {
        self.seen.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }
}

#[async_trait]
impl UpstreamRelay for MockUpstreamRelay {
    async fn relay(&self, query: &[u8], timeout: Duration) -> Result<RelayResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push((query.to_vec(), timeout));

        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(bytes)) => Ok(RelayResponse {
                bytes,
                server: self.server,
            }),
            Some(Err(e)) => Err(e),
            None => Err(DomainError::UpstreamTimeout {
                server: self.server.to_string(),
            }),
        }
    }
}

// ── CorrelationStore ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockCorrelationStore {
    entries: Mutex<Vec<(String, String, u32)>>,
}

impl MockCorrelationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, original: &str, cname: &str) -> Self {
        self.record_cname(original, cname, 300);
        self
    }

    /// `(original, cname, ttl)` in insertion order.
    pub fn entries(&self) -> Vec<(String, String, u32)> {
        self.entries.lock().unwrap().clone()
    }
}

impl CorrelationStore for MockCorrelationStore {
    fn record_cname(&self, original: &str, cname: &str, ttl: u32) {
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|(o, c, _)| !(o == original && c == cname));
        entries.push((original.to_string(), cname.to_string(), ttl));
    }

    fn correlated_origins(&self, name: &str) -> Vec<Arc<str>> {
        let entries = self.entries.lock().unwrap();
        let Some((_, target, _)) = entries
            .iter()
            .rev()
            .find(|(_, cname, _)| name == cname || name.ends_with(&format!(".{}", cname)))
        else {
            return Vec::new();
        };
        entries
            .iter()
            .rev()
            .filter(|(_, cname, _)| cname == target)
            .map(|(original, _, _)| Arc::from(original.as_str()))
            .collect()
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

// ── ResolutionReporter ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockResolutionReporter {
    reports: Mutex<Vec<ResolutionReport>>,
    should_fail: AtomicBool,
}

impl MockResolutionReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn reports(&self) -> Vec<ResolutionReport> {
        self.reports.lock().unwrap().clone()
    }

    /// Reports are sent from a spawned task; poll until `count` arrived.
    pub async fn wait_for(&self, count: usize) -> Vec<ResolutionReport> {
        for _ in 0..100 {
            if self.reports.lock().unwrap().len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.reports()
    }
}

#[async_trait]
impl ResolutionReporter for MockResolutionReporter {
    async fn report(&self, report: &ResolutionReport) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::ReportingError("webhook unreachable".to_string()));
        }
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }
}

// ── ResolutionLogRepository ────────────────────────────────────────────────

#[derive(Default)]
pub struct MockResolutionLogRepository {
    records: Mutex<VecDeque<ResolutionReport>>,
}

impl MockResolutionLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl ResolutionLogRepository for MockResolutionLogRepository {
    async fn record(&self, report: ResolutionReport) -> Result<(), DomainError> {
        self.records.lock().unwrap().push_front(report);
        Ok(())
    }

    async fn get_recent(&self, limit: Option<usize>) -> Result<Vec<ResolutionReport>, DomainError> {
        let records = self.records.lock().unwrap();
        let limit = limit.unwrap_or(records.len());
        Ok(records.iter().take(limit).cloned().collect())
    }
}
