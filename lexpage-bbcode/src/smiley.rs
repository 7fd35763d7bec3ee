//! Smiley substitution.
//!
//! Two sources feed the pass: a fixed table of textual emoticons, and a
//! `:name:` token for every `.gif` found in the smiley directory. The
//! directory listing is cached and rescanned according to a
//! [`RefreshPolicy`], so dropping a new image into the directory makes it
//! available without a restart.
use std::{
  path::{Path, PathBuf},
  sync::{Arc, PoisonError, RwLock},
  time::{Duration, Instant},
};

use log::debug;
use walkdir::WalkDir;

/// Built-in emoticons and the image each one maps to.
///
/// Order matters: a token must come before any shorter token that is a
/// prefix of it (`:-((` before `:-(`), or it could never match.
pub const BUILTIN_SMILEYS: &[(&str, &str)] = &[
  (":-)", "smile"),
  (";-)", "wink"),
  (":-p", "tongue"),
  (":-D", "bigsmile"),
  (":-((", "angry2"),
  (":-(", "angry"),
  (":'((", "bawling"),
  (":'(", "sad"),
  (":-/", "upset"),
  ("o.O", "odd"),
  ("o_O", "odd"),
  (":o)", "blush"),
  (":-x", "kiss"),
  (":-X", "kiss2"),
  ("8-)", "showoff"),
];

/// Extension of the images picked up from the smiley directory.
pub const SMILEY_EXTENSION: &str = "gif";

/// How often the smiley directory is rescanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
  /// Rescan on every substitution.
  Always,
  /// Rescan once the cached listing is older than the given duration.
  Every(Duration),
  /// Scan once, on first use. [`SmileyCatalog::refresh`] still forces a
  /// rescan.
  Never,
}

impl Default for RefreshPolicy {
  fn default() -> Self {
    Self::Every(Duration::from_secs(30))
  }
}

/// A smiley discovered in the smiley directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Smiley {
  /// Token as typed by users, e.g. `:banana:`.
  pub token: String,
  /// Image file name, e.g. `banana.gif`.
  pub file:  String,
}

#[derive(Debug, Default)]
struct Snapshot {
  smileys:    Arc<[Smiley]>,
  scanned_at: Option<Instant>,
}

/// Built-in smileys plus a cached listing of the smiley directory.
///
/// Cloning is cheap and clones share the cached listing.
#[derive(Debug, Clone)]
pub struct SmileyCatalog {
  directory: Option<PathBuf>,
  base_url:  String,
  policy:    RefreshPolicy,
  snapshot:  Arc<RwLock<Snapshot>>,
}

impl SmileyCatalog {
  /// Create a catalog. Nothing is scanned until first use.
  #[must_use]
  pub fn new(
    directory: Option<PathBuf>,
    base_url: impl Into<String>,
    policy: RefreshPolicy,
  ) -> Self {
    Self {
      directory,
      base_url: base_url.into(),
      policy,
      snapshot: Arc::default(),
    }
  }

  /// Directory scanned for `.gif` files, if any.
  #[must_use]
  pub fn directory(&self) -> Option<&Path> {
    self.directory.as_deref()
  }

  /// Public URL prefix of the smiley images.
  #[must_use]
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Public URL of an image file.
  #[must_use]
  pub fn image_url(&self, file: &str) -> String {
    format!("{}/{file}", self.base_url.trim_end_matches('/'))
  }

  fn image_tag(&self, file: &str) -> String {
    format!("<img src=\"{}\"/>", self.image_url(file))
  }

  /// Rescan the directory now, returning the number of smileys found.
  pub fn refresh(&self) -> usize {
    let smileys: Arc<[Smiley]> = self
      .directory
      .as_deref()
      .map(scan_directory)
      .unwrap_or_default()
      .into();
    let count = smileys.len();

    let mut snapshot = self
      .snapshot
      .write()
      .unwrap_or_else(PoisonError::into_inner);
    snapshot.smileys = smileys;
    snapshot.scanned_at = Some(Instant::now());

    count
  }

  fn is_stale(&self, scanned_at: Option<Instant>) -> bool {
    match (self.policy, scanned_at) {
      (_, None) | (RefreshPolicy::Always, _) => true,
      (RefreshPolicy::Every(ttl), Some(at)) => at.elapsed() >= ttl,
      (RefreshPolicy::Never, Some(_)) => false,
    }
  }

  /// Smileys found in the directory, rescanning first if the listing is
  /// stale.
  #[must_use]
  pub fn dynamic_smileys(&self) -> Arc<[Smiley]> {
    {
      let snapshot = self
        .snapshot
        .read()
        .unwrap_or_else(PoisonError::into_inner);
      if !self.is_stale(snapshot.scanned_at) {
        return Arc::clone(&snapshot.smileys);
      }
    }

    self.refresh();
    Arc::clone(
      &self
        .snapshot
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .smileys,
    )
  }

  /// Replace every known smiley token with its image.
  ///
  /// Built-in tokens go first, in table order, then directory smileys.
  /// Matching is exact and case-sensitive.
  #[must_use]
  pub fn substitute(&self, text: &str) -> String {
    let mut out = text.to_string();

    for (token, name) in BUILTIN_SMILEYS {
      if out.contains(token) {
        let file = format!("{name}.{SMILEY_EXTENSION}");
        out = out.replace(token, &self.image_tag(&file));
      }
    }

    for smiley in self.dynamic_smileys().iter() {
      if out.contains(&smiley.token) {
        out = out.replace(&smiley.token, &self.image_tag(&smiley.file));
      }
    }

    out
  }
}

/// List the `.gif` files directly inside `dir`, sorted by name.
///
/// A missing or unreadable directory yields no smileys.
#[must_use]
pub fn scan_directory(dir: &Path) -> Vec<Smiley> {
  if !dir.is_dir() {
    debug!(
      "Smiley directory {} not found, no custom smileys",
      dir.display()
    );
    return Vec::new();
  }

  let smileys: Vec<Smiley> = WalkDir::new(dir)
    .min_depth(1)
    .max_depth(1)
    .follow_links(true)
    .sort_by_file_name()
    .into_iter()
    .filter_map(Result::ok)
    .filter(|entry| entry.file_type().is_file())
    .filter_map(|entry| {
      let path = entry.path();
      if path.extension().is_none_or(|ext| ext != SMILEY_EXTENSION) {
        return None;
      }
      let name = path.file_stem()?.to_str()?;
      let file = entry.file_name().to_str()?;
      Some(Smiley {
        token: format!(":{name}:"),
        file:  file.to_string(),
      })
    })
    .collect();

  debug!(
    "Found {} custom smiley(s) in {}",
    smileys.len(),
    dir.display()
  );
  smileys
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  fn builtin_only() -> SmileyCatalog {
    SmileyCatalog::new(None, "/static/images/smiley/", RefreshPolicy::Always)
  }

  #[test]
  fn test_longer_tokens_precede_their_prefixes() {
    for (i, (earlier, _)) in BUILTIN_SMILEYS.iter().enumerate() {
      for (later, _) in &BUILTIN_SMILEYS[i + 1..] {
        assert!(
          !later.starts_with(earlier),
          "{later} must come before {earlier}"
        );
      }
    }
  }

  #[test]
  fn test_image_url_joins_once() {
    let catalog = builtin_only();
    assert_eq!(
      catalog.image_url("smile.gif"),
      "/static/images/smiley/smile.gif"
    );
  }

  #[test]
  fn test_bawling_beats_sad() {
    let out = builtin_only().substitute(":'((");
    assert_eq!(out, r#"<img src="/static/images/smiley/bawling.gif"/>"#);
  }

  #[test]
  fn test_case_sensitive() {
    let out = builtin_only().substitute(":-x :-X :-P");
    assert_eq!(
      out,
      "<img src=\"/static/images/smiley/kiss.gif\"/> \
       <img src=\"/static/images/smiley/kiss2.gif\"/> :-P"
    );
  }

  #[test]
  fn test_scan_directory_filters_extension() {
    let dir = tempdir().expect("Failed to create temp dir in test");
    fs::write(dir.path().join("banana.gif"), b"GIF89a").expect("write");
    fs::write(dir.path().join("apple.gif"), b"GIF89a").expect("write");
    fs::write(dir.path().join("notes.txt"), b"no").expect("write");
    fs::write(dir.path().join("big.png"), b"png").expect("write");
    fs::create_dir(dir.path().join("nested.gif")).expect("mkdir");

    let smileys = scan_directory(dir.path());
    assert_eq!(smileys, vec![
      Smiley {
        token: ":apple:".to_string(),
        file:  "apple.gif".to_string(),
      },
      Smiley {
        token: ":banana:".to_string(),
        file:  "banana.gif".to_string(),
      },
    ]);
  }

  #[test]
  fn test_missing_directory_is_empty() {
    let dir = tempdir().expect("Failed to create temp dir in test");
    assert!(scan_directory(&dir.path().join("missing")).is_empty());
  }

  #[test]
  fn test_never_policy_keeps_first_listing() {
    let dir = tempdir().expect("Failed to create temp dir in test");
    let catalog = SmileyCatalog::new(
      Some(dir.path().to_path_buf()),
      "/s",
      RefreshPolicy::Never,
    );
    assert!(catalog.dynamic_smileys().is_empty());

    fs::write(dir.path().join("new.gif"), b"GIF89a").expect("write");
    assert!(catalog.dynamic_smileys().is_empty());

    assert_eq!(catalog.refresh(), 1);
    assert_eq!(catalog.substitute(":new:"), r#"<img src="/s/new.gif"/>"#);
  }

  #[test]
  fn test_every_policy_uses_cache_within_window() {
    let dir = tempdir().expect("Failed to create temp dir in test");
    let catalog = SmileyCatalog::new(
      Some(dir.path().to_path_buf()),
      "/s",
      RefreshPolicy::Every(Duration::from_secs(3600)),
    );
    assert!(catalog.dynamic_smileys().is_empty());
    fs::write(dir.path().join("late.gif"), b"GIF89a").expect("write");
    assert!(catalog.dynamic_smileys().is_empty());

    let expired = SmileyCatalog::new(
      Some(dir.path().to_path_buf()),
      "/s",
      RefreshPolicy::Every(Duration::ZERO),
    );
    assert_eq!(expired.dynamic_smileys().len(), 1);
  }

  #[test]
  fn test_clones_share_listing() {
    let dir = tempdir().expect("Failed to create temp dir in test");
    let catalog = SmileyCatalog::new(
      Some(dir.path().to_path_buf()),
      "/s",
      RefreshPolicy::Never,
    );
    let clone = catalog.clone();
    fs::write(dir.path().join("shared.gif"), b"GIF89a").expect("write");
    catalog.refresh();
    assert_eq!(clone.dynamic_smileys().len(), 1);
  }
}
