use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A watch-list entry: an exact hostname or a `*.suffix` wildcard.
///
/// Both forms are stored lowercase without a trailing dot. A wildcard only
/// matches strict subdomains, so `*.example.com` does not match
/// `example.com` itself. `.example.com` is accepted as a spelling of
/// `*.example.com`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WatchPattern {
    Exact(Arc<str>),
    Wildcard { suffix: Arc<str> },
}

impl WatchPattern {
    pub fn matches(&self, hostname: &str) -> bool {
        let hostname = normalize_hostname(hostname);
        match self {
            WatchPattern::Exact(name) => hostname == name.as_ref(),
            WatchPattern::Wildcard { suffix } => hostname
                .strip_suffix(suffix.as_ref())
                .and_then(|prefix| prefix.strip_suffix('.'))
                .is_some_and(|label| !label.is_empty()),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, WatchPattern::Wildcard { .. })
    }
}

/// Lowercases and drops a single trailing dot.
pub fn normalize_hostname(hostname: &str) -> String {
    hostname.trim_end_matches('.').to_ascii_lowercase()
}

impl FromStr for WatchPattern {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (wildcard, body) = if let Some(rest) = trimmed.strip_prefix("*.") {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix('.') {
            (true, rest)
        } else {
            (false, trimmed)
        };

        let body = normalize_hostname(body);
        if body.is_empty() {
            return Err(DomainError::InvalidWatchPattern(format!(
                "'{}' names no domain",
                s
            )));
        }
        if body.contains('*') {
            return Err(DomainError::InvalidWatchPattern(format!(
                "'{}': '*' is only allowed as the leading label",
                s
            )));
        }
        if body.split('.').any(str::is_empty) {
            return Err(DomainError::InvalidWatchPattern(format!(
                "'{}' contains an empty label",
                s
            )));
        }

        let body: Arc<str> = body.into();
        Ok(if wildcard {
            WatchPattern::Wildcard { suffix: body }
        } else {
            WatchPattern::Exact(body)
        })
    }
}

impl TryFrom<String> for WatchPattern {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WatchPattern> for String {
    fn from(pattern: WatchPattern) -> Self {
        pattern.to_string()
    }
}

impl fmt::Display for WatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchPattern::Exact(name) => write!(f, "{}", name),
            WatchPattern::Wildcard { suffix } => write!(f, "*.{}", suffix),
        }
    }
}

/// The immutable watch-list consulted for every query.
#[derive(Debug, Clone)]
pub struct HostnameMatcher {
    patterns: Arc<[WatchPattern]>,
}

impl HostnameMatcher {
    pub fn new(patterns: impl IntoIterator<Item = WatchPattern>) -> Self {
        Self {
            patterns: patterns.into_iter().collect(),
        }
    }

    pub fn is_matched_hostname(&self, hostname: &str) -> bool {
        self.matching_pattern(hostname).is_some()
    }

    pub fn matching_pattern(&self, hostname: &str) -> Option<&WatchPattern> {
        self.patterns.iter().find(|p| p.matches(hostname))
    }

    pub fn patterns(&self) -> &[WatchPattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
