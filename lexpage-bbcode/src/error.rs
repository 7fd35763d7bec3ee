//! Error types for BBcode rendering.

/// Result type for BBcode operations.
pub type BbcodeResult<T> = Result<T, BbcodeError>;

/// Errors that can occur while building a renderer.
///
/// Rendering itself never fails; these only surface when compiling the tag
/// table or validating options.
#[derive(Debug, thiserror::Error)]
pub enum BbcodeError {
  #[error("Failed to compile pattern for the [{tag}] tag: {source}")]
  Pattern {
    tag:    &'static str,
    #[source]
    source: regex::Error,
  },

  #[error("Invalid renderer option: {0}")]
  InvalidOption(String),
}
