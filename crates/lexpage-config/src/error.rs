use thiserror::Error;

/// Error type for lexpage-config operations
///
/// Read and parse failures are reported as [`ConfigError::Config`] with the
/// offending path in the message.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),

  #[error("TOML serialization error: {0}")]
  TomlSerialize(#[from] toml::ser::Error),

  #[error(transparent)]
  Renderer(#[from] lexpage_bbcode::BbcodeError),
}
