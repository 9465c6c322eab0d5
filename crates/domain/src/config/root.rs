use serde::{Deserialize, Serialize};

use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::reporting::ReportingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamTarget;
use super::watch::WatchConfig;
use crate::watch_pattern::WatchPattern;

const LOCAL_CONFIG_PATH: &str = "dnswatch.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/dnswatch/config.toml";

/// Main configuration structure for dnswatch
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream relay configuration
    #[serde(default)]
    pub dns: DnsConfig,

    /// Watched hostnames and CNAME correlation bounds
    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub reporting: ReportingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dnswatch.toml in current directory
    /// 3. /etc/dnswatch/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path.map(str::to_string).or_else(Self::get_config_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if !overrides.upstreams.is_empty() {
            self.dns.upstream_servers = overrides.upstreams;
        }
        for pattern in overrides.watch_patterns {
            if !self.watch.patterns.contains(&pattern) {
                self.watch.patterns.push(pattern);
            }
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.sidecar {
            self.reporting.sidecar.enabled = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.dns.upstream_servers.is_empty() {
            return Err(ConfigError::Validation(
                "No upstream servers configured".to_string(),
            ));
        }

        for upstream in &self.dns.upstream_servers {
            if upstream.host.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "Upstream server host cannot be empty".to_string(),
                ));
            }
            if upstream.port == 0 {
                return Err(ConfigError::Validation(format!(
                    "Upstream server '{}' has port 0",
                    upstream.host
                )));
            }
        }

        if self.dns.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "Query timeout must be greater than 0".to_string(),
            ));
        }

        if self.dns.retry_attempts == 0 {
            return Err(ConfigError::Validation(
                "Retry attempts must be at least 1".to_string(),
            ));
        }

        if self.watch.correlation_capacity == 0 {
            return Err(ConfigError::Validation(
                "Correlation capacity must be greater than 0".to_string(),
            ));
        }

        if self.watch.correlation_min_ttl > self.watch.correlation_max_ttl {
            return Err(ConfigError::Validation(format!(
                "correlation_min_ttl ({}) exceeds correlation_max_ttl ({})",
                self.watch.correlation_min_ttl, self.watch.correlation_max_ttl
            )));
        }

        if self.reporting.sidecar.enabled {
            if self.reporting.sidecar.port == 0 {
                return Err(ConfigError::Validation(
                    "Sidecar port cannot be 0".to_string(),
                ));
            }
            if self.reporting.sidecar.capacity == 0 {
                return Err(ConfigError::Validation(
                    "Sidecar capacity must be greater than 0".to_string(),
                ));
            }
        }

        if let Some(url) = &self.reporting.webhook_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Validation(format!(
                    "Webhook URL '{}' must use http or https",
                    url
                )));
            }
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| std::path::Path::new(p).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    /// Replaces the configured upstream list when non-empty.
    pub upstreams: Vec<UpstreamTarget>,
    /// Appended to the configured watch patterns.
    pub watch_patterns: Vec<WatchPattern>,
    pub log_level: Option<String>,
    pub sidecar: bool,
}
