#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("Invalid TOML: {0}")]
    Parse(String),

    /// A value that parsed but is out of range or inconsistent.
    #[error("Invalid configuration: {0}")]
    Validation(String),
}
