//! The BBcode tag table.
//!
//! Each rule pairs a pattern with two replacement templates: one producing
//! HTML, one producing plain text. Both modes share the compiled pattern, so
//! rendering and stripping always agree on what counts as a tag.
//!
//! Rules are split into two ordered groups:
//!
//! - simple rules, applied once each, in order;
//! - advanced rules, each re-applied until the text stops changing, so that
//!   nested quotes and code blocks resolve one level per pass.
use std::{
  borrow::Cow,
  sync::{Arc, LazyLock},
};

use log::error;
use regex::{Regex, RegexBuilder};

use crate::error::{BbcodeError, BbcodeResult};

/// URL accepted by the link, image and embed tags.
///
/// At least three characters after the scheme, and never whitespace or a
/// bracket, so a bare URL stops at the first closing delimiter.
pub const URL_PATTERN: &str = r"(?:ftp|https?)://[^\s()\[\]]{3,}?";

/// Which replacement template a rule substitutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// HTML output, used by rendering.
  Html,
  /// Plain text output, used by stripping.
  Text,
}

/// Uncompiled tag definition. `{url}` in a pattern expands to
/// [`URL_PATTERN`].
struct TagDef {
  tag:     &'static str,
  pattern: &'static str,
  html:    &'static str,
  text:    &'static str,
}

const fn def(
  tag: &'static str,
  pattern: &'static str,
  html: &'static str,
  text: &'static str,
) -> TagDef {
  TagDef {
    tag,
    pattern,
    html,
    text,
  }
}

const SIMPLE_TAGS: &[TagDef] = &[
  def("b", r"\[b\](.*?)\[/b\]", "<b>${1}</b>", "${1}"),
  def("u", r"\[u\](.*?)\[/u\]", "<u>${1}</u>", "${1}"),
  def("i", r"\[i\](.*?)\[/i\]", "<em>${1}</em>", "${1}"),
  def(
    "strike",
    r"\[strike\](.*?)\[/strike\]",
    "<strike>${1}</strike>",
    "${1}",
  ),
  def(
    "color",
    r"\[color=(.*?)\](.*?)\[/color\]",
    r#"<span style="color:${1};">${2}</span>"#,
    "${2}",
  ),
  def(
    "font",
    r"\[font=(.*?)\](.*?)\[/font\]",
    r#"<span style="font-family:${1};">${2}</span>"#,
    "${2}",
  ),
  def(
    "size",
    r"\[size=(.*?)\](.*?)\[/size\]",
    r#"<span style="font-size:${1};">${2}</span>"#,
    "${2}",
  ),
  def(
    "align",
    r"\[align=(.*?)\](.*?)\[/align\]",
    r#"<div align="${1}">${2}</div>"#,
    "${2}",
  ),
  def(
    "autolink",
    r"(\s|\(|\[)({url})(\s|\)|\])",
    r#"${1}<a href="${2}">${2}</a>${3}"#,
    "${1}${2}${3}",
  ),
  def(
    "url",
    r"\[url\]({url})\[/url\]",
    r#"<a href="${1}">${1}</a>"#,
    "${1}",
  ),
  def(
    "url=",
    r"\[url=({url})\](.*?)\[/url\]",
    r#"<a href="${1}">${2}</a>"#,
    "${2}",
  ),
  def(
    "img",
    r"\[img\]({url})\[/img\]",
    r#"<img src="${1}"/>"#,
    "${1}",
  ),
  def(
    "embed",
    r"\[embed\]({url})\[/embed\]",
    r#"<a class="oembed" href="${1}">${1}</a>"#,
    "${1}",
  ),
  // `$$` is a literal dollar in a replacement template.
  def(
    "spoiler",
    r"\[spoiler\](.*?)\[/spoiler\]",
    r#"<span class="spoiler" onclick="$$(this).toggleClass('spoiler-show');"><span>${1}</span></span>"#,
    "${1}",
  ),
];

// Block forms swallow the blank lines around them.
const ADVANCED_TAGS: &[TagDef] = &[
  def(
    "code",
    r"\[code\]([^\n]*?)\[/code\]",
    "<code>${1}</code>",
    "${1}",
  ),
  def(
    "code block",
    r"\n*\[code\]\n?(.*?)\n?\[/code\]\n*",
    "<pre><code>${1}</code></pre>",
    "${1}",
  ),
  def(
    "quote",
    r"\n*\[quote\]\n?(.*?)\n?\[/quote\]\n*",
    "<blockquote>${1}</blockquote>",
    " ${1} ",
  ),
  def(
    "quote=",
    r"\n*\[quote=(.*?)\]\n?(.*?)\n?\[/quote\]\n*",
    "<blockquote><cite>${1}</cite>${2}</blockquote>",
    " ${1}: ${2} ",
  ),
  def(
    "sign",
    r"\[sign=(.*?)\](.*?)\[/sign\]",
    r#"<div class="sign sign-base"><div class="text">${2}</div><div class="smiley">${1}</div></div>"#,
    "${2}",
  ),
];

/// A compiled tag rule.
#[derive(Debug, Clone)]
pub struct TagRule {
  tag:     &'static str,
  pattern: Regex,
  html:    &'static str,
  text:    &'static str,
}

impl TagRule {
  fn compile(def: &TagDef) -> BbcodeResult<Self> {
    let source = def.pattern.replace("{url}", URL_PATTERN);
    let pattern = RegexBuilder::new(&source)
      .multi_line(true)
      .dot_matches_new_line(true)
      .build()
      .map_err(|source| {
        BbcodeError::Pattern {
          tag: def.tag,
          source,
        }
      })?;

    Ok(Self {
      tag: def.tag,
      pattern,
      html: def.html,
      text: def.text,
    })
  }

  /// Tag name, for diagnostics.
  #[must_use]
  pub const fn tag(&self) -> &'static str {
    self.tag
  }

  /// The compiled pattern.
  #[must_use]
  pub const fn pattern(&self) -> &Regex {
    &self.pattern
  }

  /// Replacement template for the given mode.
  #[must_use]
  pub const fn template(&self, mode: Mode) -> &'static str {
    match mode {
      Mode::Html => self.html,
      Mode::Text => self.text,
    }
  }

  /// Substitute every non-overlapping match, left to right.
  #[must_use]
  pub fn apply<'t>(&self, text: &'t str, mode: Mode) -> Cow<'t, str> {
    self.pattern.replace_all(text, self.template(mode))
  }
}

/// The ordered simple and advanced rule groups.
#[derive(Debug, Clone, Default)]
pub struct TagTable {
  simple:   Vec<TagRule>,
  advanced: Vec<TagRule>,
}

static SHARED: LazyLock<Arc<TagTable>> = LazyLock::new(|| {
  Arc::new(TagTable::compile().unwrap_or_else(|e| {
    error!("{e}\n Falling back to an empty tag table.");
    TagTable::default()
  }))
});

impl TagTable {
  /// Compile the built-in tag definitions.
  ///
  /// # Errors
  ///
  /// Returns [`BbcodeError::Pattern`] if a built-in pattern fails to compile.
  pub fn compile() -> BbcodeResult<Self> {
    Ok(Self {
      simple:   SIMPLE_TAGS
        .iter()
        .map(TagRule::compile)
        .collect::<BbcodeResult<_>>()?,
      advanced: ADVANCED_TAGS
        .iter()
        .map(TagRule::compile)
        .collect::<BbcodeResult<_>>()?,
    })
  }

  /// Process-wide table, compiled on first use.
  #[must_use]
  pub fn shared() -> Arc<Self> {
    Arc::clone(&SHARED)
  }

  /// Rules applied once each.
  #[must_use]
  pub fn simple(&self) -> &[TagRule] {
    &self.simple
  }

  /// Rules applied until the text reaches a fixed point.
  #[must_use]
  pub fn advanced(&self) -> &[TagRule] {
    &self.advanced
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;

  fn rule(table: &TagTable, tag: &str) -> TagRule {
    table
      .simple()
      .iter()
      .chain(table.advanced())
      .find(|r| r.tag() == tag)
      .cloned()
      .expect("tag should exist")
  }

  #[test]
  fn test_all_patterns_compile() {
    let table = TagTable::compile().expect("built-in patterns compile");
    assert_eq!(table.simple().len(), SIMPLE_TAGS.len());
    assert_eq!(table.advanced().len(), ADVANCED_TAGS.len());
  }

  #[test]
  fn test_shared_table_is_reused() {
    let a = TagTable::shared();
    let b = TagTable::shared();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(!a.simple().is_empty());
  }

  #[test]
  fn test_spoiler_keeps_literal_dollar() {
    let table = TagTable::compile().expect("built-in patterns compile");
    let out = rule(&table, "spoiler").apply("[spoiler]boo[/spoiler]", Mode::Html);
    assert!(out.contains(r#"onclick="$(this).toggleClass('spoiler-show');""#));
    assert!(out.contains("<span>boo</span>"));
  }

  #[test]
  fn test_url_needs_three_characters_after_scheme() {
    let table = TagTable::compile().expect("built-in patterns compile");
    let url = rule(&table, "url");
    assert_eq!(url.apply("[url]http://ab[/url]", Mode::Html), "[url]http://ab[/url]");
    assert_eq!(
      url.apply("[url]ftp://abc[/url]", Mode::Html),
      r#"<a href="ftp://abc">ftp://abc</a>"#
    );
  }

  #[test]
  fn test_bare_ftp_keyword_is_not_a_link() {
    let table = TagTable::compile().expect("built-in patterns compile");
    let autolink = rule(&table, "autolink");
    assert_eq!(autolink.apply("use ftp please", Mode::Html), "use ftp please");
  }

  #[test]
  fn test_same_pattern_both_modes() {
    let table = TagTable::compile().expect("built-in patterns compile");
    let color = rule(&table, "color");
    assert_eq!(
      color.apply("[color=red]hot[/color]", Mode::Html),
      r#"<span style="color:red;">hot</span>"#
    );
    assert_eq!(color.apply("[color=red]hot[/color]", Mode::Text), "hot");
  }
}
