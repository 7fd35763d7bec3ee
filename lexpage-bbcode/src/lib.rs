//! # lexpage-bbcode
//!
//! Renders the BBcode dialect used on Lexpage into HTML, or strips it down to
//! plain text for previews and summaries.
//!
//! ## Quick Start
//!
//! ```rust
//! use lexpage_bbcode::{BbcodeOptions, BbcodeRenderer};
//!
//! let renderer = BbcodeRenderer::new(BbcodeOptions::default());
//!
//! let html = renderer.render("[b]Salut[/b] :-)");
//! assert_eq!(
//!   html.as_str(),
//!   r#"<b>Salut</b> <img src="/static/images/smiley/smile.gif"/>"#
//! );
//!
//! let text = renderer.strip("[quote=Lex]Bonjour[/quote]");
//! assert_eq!(text, " Lex: Bonjour ");
//! ```
//!
//! ## Pipeline
//!
//! 1. Characters with a named HTML entity are escaped, so user input can
//!    never inject markup.
//! 2. Simple tags (`[b]`, `[url]`, `[spoiler]`, ...) are substituted once
//!    each, in table order.
//! 3. Advanced tags (`[code]`, `[quote]`, `[sign]`) are substituted until the
//!    text stops changing, resolving one level of nesting per pass.
//! 4. Rendering then replaces smileys and turns newlines into `<br/>`.
//!
//! Malformed markup is never an error: tags that do not match are left in
//! the output as literal text.
mod error;

pub mod entities;
pub mod processor;
pub mod smiley;
pub mod substitute;
pub mod tags;
pub mod utils;

pub use crate::{
  entities::escape_entities,
  error::{BbcodeError, BbcodeResult},
  processor::{
    BbcodeOptions,
    BbcodeOptionsBuilder,
    BbcodeRenderer,
    DEFAULT_SMILEY_URL,
    SafeHtml,
  },
  smiley::{RefreshPolicy, Smiley, SmileyCatalog},
  tags::{Mode, TagRule, TagTable},
  utils::strip_bbcode,
};
