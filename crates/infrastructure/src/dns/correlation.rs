use dnswatch_application::ports::CorrelationStore;
use dnswatch_domain::correlation::name_suffixes;
use dnswatch_domain::watch_pattern::normalize_hostname;
use dnswatch_domain::{CorrelationEntry, WatchConfig};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(10_000) {
    Some(n) => n,
    None => unreachable!(),
};

/// Origins remembered per target; the oldest is dropped past this.
const MAX_ORIGINS_PER_TARGET: usize = 16;

type Entries = LruCache<Arc<str>, Vec<CorrelationEntry>>;

/// CNAME correlations keyed by normalised target name.
///
/// Each target keeps one entry per origin that reached it, newest first,
/// and every entry expires after its own (clamped) TTL. Expired entries are
/// swept when a lookup touches them. Capacity counts targets; when full, the
/// least recently used target is evicted with all of its origins.
pub struct LruCorrelationStore {
    entries: Mutex<Entries>,
    min_ttl: u32,
    max_ttl: u32,
}

impl LruCorrelationStore {
    pub fn new(capacity: usize, min_ttl: u32, max_ttl: u32) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            min_ttl: min_ttl.min(max_ttl),
            max_ttl,
        }
    }

    pub fn from_config(config: &WatchConfig) -> Self {
        Self::new(
            config.correlation_capacity,
            config.correlation_min_ttl,
            config.correlation_max_ttl,
        )
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    fn clamp_ttl(&self, ttl: u32) -> u32 {
        ttl.clamp(self.min_ttl, self.max_ttl)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CorrelationStore for LruCorrelationStore {
    fn record_cname(&self, original: &str, cname: &str, ttl: u32) {
        let key: Arc<str> = normalize_hostname(cname).into();
        if key.is_empty() {
            return;
        }
        let origin: Arc<str> = normalize_hostname(original).into();
        let ttl = self.clamp_ttl(ttl);
        let entry = CorrelationEntry::new(Arc::clone(&origin), Arc::clone(&key))
            .with_ttl(Duration::from_secs(ttl as u64));

        let now = Instant::now();
        let mut entries = self.lock();
        if let Some(origins) = entries.get_mut(&key) {
            origins.retain(|e| !e.is_expired(now) && e.original_hostname != origin);
            origins.insert(0, entry);
            origins.truncate(MAX_ORIGINS_PER_TARGET);
        } else if let Some((evicted, _)) = entries.push(Arc::clone(&key), vec![entry]) {
            trace!(cname = %evicted, "Correlation evicted");
        }
        debug!(origin = %original, cname = %cname, ttl, "Correlation recorded");
    }

    fn correlated_origins(&self, name: &str) -> Vec<Arc<str>> {
        let name = normalize_hostname(name);
        let now = Instant::now();
        let mut entries = self.lock();

        for candidate in name_suffixes(&name) {
            let Some(origins) = entries.get_mut(candidate) else {
                continue;
            };
            origins.retain(|e| !e.is_expired(now));
            if origins.is_empty() {
                trace!(cname = %candidate, "Correlation expired");
                entries.pop(candidate);
                continue;
            }
            return origins
                .iter()
                .map(|e| Arc::clone(&e.original_hostname))
                .collect();
        }
        Vec::new()
    }

    fn len(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.lock();
        let mut live = 0;
        let mut drained = Vec::new();
        for (key, origins) in entries.iter_mut() {
            origins.retain(|e| !e.is_expired(now));
            if origins.is_empty() {
                drained.push(Arc::clone(key));
            }
            live += origins.len();
        }
        for key in &drained {
            entries.pop(key.as_ref());
        }
        live
    }
}
