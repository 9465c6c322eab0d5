use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Summary of a watched resolution, as posted to the reporting sidecar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub hostname: String,
    pub ips: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl ResolutionReport {
    pub fn new(hostname: impl Into<String>, addresses: &[IpAddr]) -> Self {
        Self {
            hostname: hostname.into(),
            ips: addresses.iter().map(IpAddr::to_string).collect(),
            timestamp: Utc::now(),
        }
    }
}
