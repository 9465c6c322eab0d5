use chrono::{DateTime, SecondsFormat, Utc};
use dnswatch_domain::ResolutionReport;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResolutionDto {
    pub hostname: String,
    pub ips: Vec<String>,
    pub timestamp: String,
}

impl From<ResolutionReport> for ResolutionDto {
    fn from(report: ResolutionReport) -> Self {
        Self {
            hostname: report.hostname,
            ips: report.ips,
            timestamp: report.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Body of `POST /api/dns-resolutions`. Unknown fields are ignored.
#[derive(Deserialize, Debug, Clone)]
pub struct RecordResolutionRequest {
    pub hostname: String,
    pub ips: Vec<String>,
    /// RFC 3339; any offset is converted to UTC.
    pub timestamp: DateTime<Utc>,
}

impl RecordResolutionRequest {
    /// `None` when the hostname is blank.
    pub fn into_report(self) -> Option<ResolutionReport> {
        let hostname = self.hostname.trim();
        if hostname.is_empty() {
            return None;
        }
        Some(ResolutionReport {
            hostname: hostname.to_string(),
            ips: self.ips,
            timestamp: self.timestamp,
        })
    }
}
