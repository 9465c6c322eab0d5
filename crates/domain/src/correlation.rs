use std::sync::Arc;
use std::time::{Duration, Instant};

/// A CNAME target attributed back to the watched hostname that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationEntry {
    pub original_hostname: Arc<str>,
    pub cname: Arc<str>,
    pub expires_at: Option<Instant>,
}

impl CorrelationEntry {
    pub fn new(original_hostname: impl Into<Arc<str>>, cname: impl Into<Arc<str>>) -> Self {
        Self {
            original_hostname: original_hostname.into(),
            cname: cname.into(),
            expires_at: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.expires_at = Instant::now().checked_add(ttl);
        self
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// `name` followed by each of its parent domains, the root excluded.
///
/// Only unescaped dots separate labels, so `a\.b.example` yields itself and
/// then `example`.
pub fn name_suffixes(name: &str) -> impl Iterator<Item = &str> {
    let mut next = (!name.is_empty()).then_some(name);
    std::iter::from_fn(move || {
        let current = next?;
        next = label_end(current)
            .map(|dot| &current[dot + 1..])
            .filter(|parent| !parent.is_empty());
        Some(current)
    })
}

/// Byte offset of the first unescaped `.` in `name`.
fn label_end(name: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, b) in name.bytes().enumerate() {
        match b {
            _ if escaped => escaped = false,
            b'\\' => escaped = true,
            b'.' => return Some(i),
            _ => {}
        }
    }
    None
}
