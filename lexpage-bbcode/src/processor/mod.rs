//! BBcode processing.
//!
//! - [`core`]: render and strip pipelines
//! - [`types`]: options, builder, renderer and output types
pub mod core;
pub mod types;

pub use types::{
  BbcodeOptions,
  BbcodeOptionsBuilder,
  BbcodeRenderer,
  DEFAULT_SMILEY_URL,
  SafeHtml,
};
