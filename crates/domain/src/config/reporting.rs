use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ReportingConfig {
    /// Endpoint that receives a JSON summary of every watched resolution.
    #[serde(default)]
    pub webhook_url: Option<String>,

    #[serde(default)]
    pub sidecar: SidecarConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SidecarConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of most recent resolutions kept in memory.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for SidecarConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bind_address: default_bind_address(),
            port: default_port(),
            capacity: default_capacity(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_capacity() -> usize {
    100
}
