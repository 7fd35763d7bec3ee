use lexpage_bbcode::substitute::DEFAULT_MAX_PASSES;
use serde::{Deserialize, Serialize};

/// Configuration for the substitution passes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
  /// How many times a nesting-aware tag (`[quote]`, `[code]`, `[sign]`) may
  /// be re-applied before giving up on deeper levels.
  pub max_passes: usize,
}

impl Default for RenderConfig {
  fn default() -> Self {
    Self {
      max_passes: DEFAULT_MAX_PASSES,
    }
  }
}
