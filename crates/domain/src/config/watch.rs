use serde::{Deserialize, Serialize};

use crate::watch_pattern::WatchPattern;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchConfig {
    #[serde(default)]
    pub patterns: Vec<WatchPattern>,

    /// Upper bound on live CNAME correlations; least recently used go first.
    #[serde(default = "default_correlation_capacity")]
    pub correlation_capacity: usize,

    /// Seconds; CNAME TTLs below this are raised to it.
    #[serde(default = "default_correlation_min_ttl")]
    pub correlation_min_ttl: u32,

    /// Seconds; CNAME TTLs above this are capped to it.
    #[serde(default = "default_correlation_max_ttl")]
    pub correlation_max_ttl: u32,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            patterns: vec![],
            correlation_capacity: default_correlation_capacity(),
            correlation_min_ttl: default_correlation_min_ttl(),
            correlation_max_ttl: default_correlation_max_ttl(),
        }
    }
}

fn default_correlation_capacity() -> usize {
    10_000
}

fn default_correlation_min_ttl() -> u32 {
    30
}

fn default_correlation_max_ttl() -> u32 {
    3600
}
