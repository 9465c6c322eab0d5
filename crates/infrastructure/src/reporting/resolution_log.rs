use async_trait::async_trait;
use dnswatch_application::ports::ResolutionLogRepository;
use dnswatch_domain::{DomainError, ResolutionReport};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Fixed-size, newest-first log of reported resolutions.
pub struct InMemoryResolutionLog {
    records: Mutex<VecDeque<ResolutionReport>>,
    capacity: usize,
}

impl InMemoryResolutionLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[async_trait]
impl ResolutionLogRepository for InMemoryResolutionLog {
    async fn record(&self, report: ResolutionReport) -> Result<(), DomainError> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.push_front(report);
        records.truncate(self.capacity);
        Ok(())
    }

    async fn get_recent(&self, limit: Option<usize>) -> Result<Vec<ResolutionReport>, DomainError> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let limit = limit.unwrap_or(self.capacity);
        Ok(records.iter().take(limit).cloned().collect())
    }
}
