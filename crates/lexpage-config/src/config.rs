use std::{
  fs,
  path::{Path, PathBuf},
};

use lexpage_bbcode::{BbcodeOptions, BbcodeOptionsBuilder};
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, render::RenderConfig, smileys::SmileysConfig};

/// Configuration for the Lexpage BBcode renderer.
///
/// Loaded from a TOML or JSON file; every field has a default so a partial
/// (or empty) file is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Smiley directory, public URL and rescan policy.
  pub smileys: SmileysConfig,

  /// Substitution pass settings.
  pub render: RenderConfig,
}

impl Config {
  /// Load configuration from a file (TOML or JSON).
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to read config file: {}: {}",
        path.display(),
        e
      ))
    })?;

    match path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase)
      .as_deref()
    {
      Some("json") => {
        serde_json::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse JSON config from {}: {}",
            path.display(),
            e
          ))
        })
      },
      Some("toml") => {
        toml::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse TOML config from {}: {}",
            path.display(),
            e
          ))
        })
      },
      Some(_) => {
        Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
      None => {
        Err(ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }

  /// Load the given file, or a discovered one, or the defaults.
  ///
  /// # Errors
  ///
  /// Returns an error if the selected file cannot be loaded.
  pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
    match config_file {
      Some(path) => Self::from_file(path),
      None => Self::load_discovered(Self::find_config_file().as_deref()),
    }
  }

  /// Load a discovered config file, or the defaults when none was found.
  /// Errors from [`Config::from_file`] already name the file and are
  /// returned as is.
  fn load_discovered(discovered: Option<&Path>) -> Result<Self, ConfigError> {
    if let Some(path) = discovered {
      log::info!("Using discovered config file: {}", path.display());
      return Self::from_file(path);
    }

    log::debug!("No config file found, using defaults");
    Ok(Self::default())
  }

  /// Search for config files in common locations
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    Self::find_config_file_in(&current_dir).or_else(|| {
      let xdg_config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| {
          std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".config"))
        })?;
      ["lexpage/config.toml", "lexpage/config.json"]
        .iter()
        .map(|name| xdg_config_dir.join(name))
        .find(|path| path.is_file())
    })
  }

  /// Search `dir` for a config file, in order of preference.
  #[must_use]
  pub fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    [
      "lexpage.toml",
      "lexpage.json",
      ".lexpage.toml",
      ".lexpage.json",
      ".config/lexpage.toml",
      ".config/lexpage.json",
    ]
    .iter()
    .map(|name| dir.join(name))
    .find(|path| path.is_file())
  }

  /// Convert into validated renderer options.
  ///
  /// # Errors
  ///
  /// Returns an error if the refresh policy cannot be parsed or the options
  /// fail validation.
  pub fn to_options(&self) -> Result<BbcodeOptions, ConfigError> {
    let options = BbcodeOptionsBuilder::new()
      .smiley_dir(self.smileys.directory.clone())
      .smiley_url(self.smileys.base_url.clone())
      .smiley_refresh(self.smileys.refresh_policy()?)
      .max_passes(self.render.max_passes)
      .build();
    options.validate()?;
    Ok(options)
  }

  /// Write the default configuration in the given format (`toml` or
  /// `json`).
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unknown or the file cannot be
  /// written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let defaults = Self::default();
    let content = match format {
      "toml" => toml::to_string_pretty(&defaults)?,
      "json" => serde_json::to_string_pretty(&defaults)?,
      other => {
        return Err(ConfigError::Config(format!(
          "Unsupported config format: {other}"
        )));
      },
    };

    fs::write(path, content).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to write default config to {}: {}",
        path.display(),
        e
      ))
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}
