use std::sync::Arc;

/// Remembers which watched hostnames a CNAME target was reached from.
pub trait CorrelationStore: Send + Sync {
    /// Attributes `cname` to `original` for `ttl` seconds, refreshing the
    /// existing entry for the same (origin, target) pair. Other origins of
    /// the same target keep their own entries.
    fn record_cname(&self, original: &str, cname: &str, ttl: u32);

    /// Origins of the live entries for the closest target that is `name` or
    /// a parent of `name`, most recently recorded first.
    fn correlated_origins(&self, name: &str) -> Vec<Arc<str>>;

    fn correlated_origin(&self, name: &str) -> Option<Arc<str>> {
        self.correlated_origins(name).into_iter().next()
    }

    fn is_correlated(&self, name: &str) -> bool {
        self.correlated_origin(name).is_some()
    }

    /// Live (origin, target) pairs.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
