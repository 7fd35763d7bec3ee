//! Render and strip pipelines.
use std::sync::Arc;

use log::trace;

use super::types::{BbcodeOptions, BbcodeRenderer, SafeHtml};
use crate::{
  entities::escape_entities,
  smiley::SmileyCatalog,
  substitute::{apply_fixed_point, apply_simple},
  tags::{Mode, TagTable},
};

impl BbcodeRenderer {
  /// Create a new `BbcodeRenderer` backed by the shared tag table.
  #[must_use]
  pub fn new(options: BbcodeOptions) -> Self {
    Self::with_tags(options, TagTable::shared())
  }

  /// Create a renderer with an explicit tag table.
  #[must_use]
  pub fn with_tags(options: BbcodeOptions, tags: Arc<TagTable>) -> Self {
    let smileys = SmileyCatalog::new(
      options.smiley_dir.clone(),
      options.smiley_url.clone(),
      options.smiley_refresh,
    );
    Self {
      options,
      tags,
      smileys,
    }
  }

  /// The options this renderer was built with.
  #[must_use]
  pub const fn options(&self) -> &BbcodeOptions {
    &self.options
  }

  /// The tag table in use.
  #[must_use]
  pub fn tags(&self) -> &TagTable {
    &self.tags
  }

  /// The smiley catalog in use.
  #[must_use]
  pub const fn smileys(&self) -> &SmileyCatalog {
    &self.smileys
  }

  /// Render BBcode to HTML, smileys included.
  #[must_use]
  pub fn render(&self, text: &str) -> SafeHtml {
    self.render_with(text, true)
  }

  /// Render BBcode to HTML.
  ///
  /// Pipeline: entity escaping, simple tags, advanced tags, smileys (when
  /// `substitute_smileys` is set), then line breaks. Unmatched tags are left
  /// as literal text.
  #[must_use]
  pub fn render_with(&self, text: &str, substitute_smileys: bool) -> SafeHtml {
    let mut html = self.convert(text, Mode::Html);

    if substitute_smileys {
      html = self.smileys.substitute(&html);
    }

    SafeHtml::new(html.replace("\r\n", "\n").replace('\n', "<br/>"))
  }

  /// Reduce BBcode to plain text, keeping tag contents.
  ///
  /// The result is still entity-escaped, so it can be embedded in HTML.
  #[must_use]
  pub fn strip(&self, text: &str) -> String {
    self.convert(text, Mode::Text)
  }

  /// Run the smiley pass alone.
  ///
  /// The input is not escaped, so the result is only as safe as `text`.
  /// Escape untrusted input first, or use [`Self::render`].
  #[must_use]
  pub fn substitute_smileys(&self, text: &str) -> String {
    self.smileys.substitute(text)
  }

  fn convert(&self, text: &str, mode: Mode) -> String {
    convert(&self.tags, text, mode, self.options.max_passes)
  }
}

/// Escape, then run both substitution passes in the given mode.
pub(crate) fn convert(
  tags: &TagTable,
  text: &str,
  mode: Mode,
  max_passes: usize,
) -> String {
  let escaped = escape_entities(text).into_owned();
  let simple = apply_simple(escaped, tags.simple(), mode);
  let converted = apply_fixed_point(simple, tags.advanced(), mode, max_passes);
  trace!(
    "Converted {} byte(s) of BBcode to {} byte(s) ({mode:?})",
    text.len(),
    converted.len()
  );
  converted
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_renderer_is_send_and_sync() {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BbcodeRenderer>();
  }

  #[test]
  fn test_escape_runs_before_tags() {
    let renderer = BbcodeRenderer::new(BbcodeOptions::default());
    assert_eq!(
      renderer.render("[b]<i>[/b]"),
      "<b>&lt;i&gt;</b>"
    );
  }

  #[test]
  fn test_smileys_run_after_tags() {
    let renderer = BbcodeRenderer::new(BbcodeOptions::default());
    assert_eq!(
      renderer.render("[code]:-)[/code]"),
      r#"<code><img src="/static/images/smiley/smile.gif"/></code>"#
    );
    assert_eq!(
      renderer.render_with("[code]:-)[/code]", false),
      "<code>:-)</code>"
    );
  }

  #[test]
  fn test_strip_keeps_newlines() {
    let renderer = BbcodeRenderer::new(BbcodeOptions::default());
    assert_eq!(renderer.strip("a\n[b]b[/b]\r\nc"), "a\nb\r\nc");
  }
}
