//! Substitution passes over the tag table.
use std::borrow::Cow;

use log::{trace, warn};

use crate::tags::{Mode, TagRule};

/// Default cap on fixed-point applications per advanced rule.
pub const DEFAULT_MAX_PASSES: usize = 64;

/// Apply one rule, reporting whether the text changed.
fn apply_rule(text: String, rule: &TagRule, mode: Mode) -> (String, bool) {
  let replaced = match rule.apply(&text, mode) {
    Cow::Owned(replaced) => Some(replaced),
    Cow::Borrowed(_) => None,
  };

  match replaced {
    Some(replaced) if replaced != text => (replaced, true),
    _ => (text, false),
  }
}

/// Apply each rule exactly once, in order, each one seeing the output of the
/// previous.
#[must_use]
pub fn apply_simple(text: String, rules: &[TagRule], mode: Mode) -> String {
  rules
    .iter()
    .fold(text, |text, rule| apply_rule(text, rule, mode).0)
}

/// Apply each rule until the text stops changing before moving to the next.
///
/// Each rule gets at most `max_passes` applications. Every successful
/// application consumes one pair of tag markers, so only input nested deeper
/// than the cap leaves markers behind; the partial result is returned as is.
#[must_use]
pub fn apply_fixed_point(
  mut text: String,
  rules: &[TagRule],
  mode: Mode,
  max_passes: usize,
) -> String {
  let max_passes = max_passes.max(1);

  for rule in rules {
    let mut passes = 0;
    let settled = loop {
      if passes == max_passes {
        break false;
      }
      let (next, changed) = apply_rule(text, rule, mode);
      text = next;
      passes += 1;
      if !changed {
        break true;
      }
    };

    if settled {
      trace!("[{}] settled after {passes} pass(es)", rule.tag());
    } else {
      warn!(
        "[{}] still changing after {max_passes} passes, leaving the rest \
         untouched",
        rule.tag()
      );
    }
  }

  text
}
