//! Convenience helpers that need no renderer configuration.
use crate::{
  processor::core::convert,
  substitute::DEFAULT_MAX_PASSES,
  tags::{Mode, TagTable},
};

/// Strip BBcode from text using the shared tag table.
///
/// Same output as [`BbcodeRenderer::strip`] with default options; stripping
/// never touches smileys, so no configuration is involved.
///
/// [`BbcodeRenderer::strip`]: crate::BbcodeRenderer::strip
#[must_use]
pub fn strip_bbcode(text: &str) -> String {
  convert(&TagTable::shared(), text, Mode::Text, DEFAULT_MAX_PASSES)
}
