//! Type definitions for the BBcode renderer.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use lexpage_bbcode::{BbcodeOptionsBuilder, BbcodeRenderer, RefreshPolicy};
//!
//! let options = BbcodeOptionsBuilder::new()
//!   .smiley_dir(Some("static/images/smiley"))
//!   .smiley_url("/static/images/smiley")
//!   .smiley_refresh(RefreshPolicy::Every(Duration::from_secs(60)))
//!   .build();
//!
//! let renderer = BbcodeRenderer::new(options);
//! ```
use std::{fmt, path::PathBuf, sync::Arc};

use crate::{
  error::{BbcodeError, BbcodeResult},
  smiley::{RefreshPolicy, SmileyCatalog},
  substitute::DEFAULT_MAX_PASSES,
  tags::TagTable,
};

/// Public URL prefix used when none is configured.
pub const DEFAULT_SMILEY_URL: &str = "/static/images/smiley";

/// Options for configuring the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BbcodeOptions {
  /// Directory holding custom `.gif` smileys. `None` disables them.
  pub smiley_dir: Option<PathBuf>,

  /// Public URL prefix the smiley images are served under.
  pub smiley_url: String,

  /// When to rescan the smiley directory.
  pub smiley_refresh: RefreshPolicy,

  /// Cap on fixed-point applications per nesting-aware tag.
  pub max_passes: usize,
}

impl Default for BbcodeOptions {
  fn default() -> Self {
    Self {
      smiley_dir:     None,
      smiley_url:     DEFAULT_SMILEY_URL.to_string(),
      smiley_refresh: RefreshPolicy::default(),
      max_passes:     DEFAULT_MAX_PASSES,
    }
  }
}

impl BbcodeOptions {
  /// Check the options for values the renderer cannot honor.
  ///
  /// # Errors
  ///
  /// Returns [`BbcodeError::InvalidOption`] when `max_passes` is zero.
  pub fn validate(&self) -> BbcodeResult<()> {
    if self.max_passes == 0 {
      return Err(BbcodeError::InvalidOption(
        "max_passes must be at least 1".to_string(),
      ));
    }
    Ok(())
  }
}

/// Builder for constructing `BbcodeOptions` with method chaining.
#[derive(Debug, Clone)]
pub struct BbcodeOptionsBuilder {
  options: BbcodeOptions,
}

impl BbcodeOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self {
      options: BbcodeOptions::default(),
    }
  }

  /// Set the custom smiley directory.
  #[must_use]
  pub fn smiley_dir<P: Into<PathBuf>>(mut self, dir: Option<P>) -> Self {
    self.options.smiley_dir = dir.map(Into::into);
    self
  }

  /// Set the public smiley URL prefix.
  #[must_use]
  pub fn smiley_url<S: Into<String>>(mut self, url: S) -> Self {
    self.options.smiley_url = url.into();
    self
  }

  /// Set the smiley directory refresh policy.
  #[must_use]
  pub const fn smiley_refresh(mut self, policy: RefreshPolicy) -> Self {
    self.options.smiley_refresh = policy;
    self
  }

  /// Set the fixed-point pass cap.
  #[must_use]
  pub const fn max_passes(mut self, passes: usize) -> Self {
    self.options.max_passes = passes;
    self
  }

  /// Build the final `BbcodeOptions`.
  #[must_use]
  pub fn build(self) -> BbcodeOptions {
    self.options
  }
}

impl Default for BbcodeOptionsBuilder {
  fn default() -> Self {
    Self::new()
  }
}

/// HTML that is safe to embed as is.
///
/// Only [`BbcodeRenderer::render`] and [`BbcodeRenderer::render_with`]
/// produce this, so holding one means the text went through entity
/// escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SafeHtml(String);

impl SafeHtml {
  pub(crate) const fn new(html: String) -> Self {
    Self(html)
  }

  /// Borrow the HTML.
  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Take the HTML out.
  #[must_use]
  pub fn into_string(self) -> String {
    self.0
  }
}

impl fmt::Display for SafeHtml {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for SafeHtml {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl PartialEq<str> for SafeHtml {
  fn eq(&self, other: &str) -> bool {
    self.0 == other
  }
}

impl PartialEq<&str> for SafeHtml {
  fn eq(&self, other: &&str) -> bool {
    self.0 == *other
  }
}

/// Main BBcode renderer.
///
/// Can be cheaply cloned and shared across threads: the tag table and the
/// smiley listing sit behind `Arc`.
#[derive(Debug, Clone)]
pub struct BbcodeRenderer {
  pub(crate) options: BbcodeOptions,
  pub(crate) tags:    Arc<TagTable>,
  pub(crate) smileys: SmileyCatalog,
}
