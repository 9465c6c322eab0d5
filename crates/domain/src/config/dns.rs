use serde::{Deserialize, Serialize};

use super::upstream::UpstreamTarget;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    #[serde(default = "default_upstream_servers")]
    pub upstream_servers: Vec<UpstreamTarget>,

    /// Milliseconds allowed for a single relay attempt.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Total relay attempts per request, the first one included.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    // Parsed for compatibility; answers are never cached.
    #[serde(default)]
    pub cache_enabled: bool,

    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: u32,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            upstream_servers: default_upstream_servers(),
            query_timeout: default_query_timeout(),
            retry_attempts: default_retry_attempts(),
            cache_enabled: false,
            cache_ttl: default_cache_ttl(),
        }
    }
}

fn default_upstream_servers() -> Vec<UpstreamTarget> {
    vec![UpstreamTarget::new("8.8.4.4", 53)]
}

fn default_query_timeout() -> u64 {
    5000
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_cache_ttl() -> u32 {
    300
}
