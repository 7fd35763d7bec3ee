use std::{path::PathBuf, time::Duration};

use lexpage_bbcode::{DEFAULT_SMILEY_URL, RefreshPolicy};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for smiley substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmileysConfig {
  /// Local directory holding the `.gif` smileys.
  pub directory: Option<PathBuf>,

  /// Public URL prefix the same images are served under.
  pub base_url: String,

  /// When to rescan `directory`:
  /// - `"always"`: on every render
  /// - `"never"`: once, at first use
  /// - `"<n>s"` or `"<n>m"`: when the listing is older than n seconds or
  ///   minutes
  pub refresh: String,
}

impl Default for SmileysConfig {
  fn default() -> Self {
    Self {
      directory: Some(PathBuf::from("static/images/smiley")),
      base_url:  DEFAULT_SMILEY_URL.to_string(),
      refresh:   "30s".to_string(),
    }
  }
}

impl SmileysConfig {
  /// Parse `refresh` into a policy.
  ///
  /// # Errors
  ///
  /// Returns an error if `refresh` is not one of the accepted forms.
  pub fn refresh_policy(&self) -> Result<RefreshPolicy, ConfigError> {
    parse_refresh(&self.refresh)
  }
}

fn parse_refresh(value: &str) -> Result<RefreshPolicy, ConfigError> {
  let value = value.trim();
  match value.to_lowercase().as_str() {
    "always" => return Ok(RefreshPolicy::Always),
    "never" => return Ok(RefreshPolicy::Never),
    _ => {},
  }

  let invalid = || {
    ConfigError::Config(format!(
      "Invalid smileys.refresh value '{value}': expected 'always', 'never', \
       '<n>s' or '<n>m'"
    ))
  };

  let (amount, scale) = if let Some(secs) = value.strip_suffix('s') {
    (secs, 1)
  } else if let Some(mins) = value.strip_suffix('m') {
    (mins, 60)
  } else {
    return Err(invalid());
  };

  let amount: u64 = amount.trim().parse().map_err(|_| invalid())?;
  Ok(RefreshPolicy::Every(Duration::from_secs(
    amount.saturating_mul(scale),
  )))
}
