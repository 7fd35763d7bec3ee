//! Subcommand handlers, kept apart from `main` so they can be tested.
use std::{
  fs,
  io::{self, Read},
  path::Path,
};

use color_eyre::eyre::{Context, Result, bail};
use lexpage_bbcode::BbcodeRenderer;
use lexpage_config::Config;
use log::{debug, info};

use crate::cli::Commands;

/// Read the whole input of a subcommand. `None` and `-` mean standard
/// input.
///
/// # Errors
///
/// Returns an error if the file or standard input cannot be read, or is not
/// valid UTF-8.
pub fn read_input(path: Option<&Path>) -> Result<String> {
  match path {
    Some(path) if path != Path::new("-") => {
      debug!("Reading {}", path.display());
      fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))
    },
    _ => {
      let mut buffer = String::new();
      io::stdin()
        .read_to_string(&mut buffer)
        .wrap_err("Failed to read standard input")?;
      Ok(buffer)
    },
  }
}

/// Run a transforming subcommand over `input` and return what it prints.
///
/// # Errors
///
/// Returns an error if the configuration does not produce valid renderer
/// options, or if `command` is `init`.
pub fn execute(
  command: &Commands,
  config: &Config,
  input: &str,
) -> Result<String> {
  let options = config
    .to_options()
    .wrap_err("Invalid renderer configuration")?;
  let renderer = BbcodeRenderer::new(options);

  let output = match command {
    Commands::Render { no_smileys, .. } => {
      renderer.render_with(input, !no_smileys).into_string()
    },
    Commands::Strip { .. } => renderer.strip(input),
    Commands::Smileys { .. } => renderer.substitute_smileys(input),
    Commands::Init { .. } => bail!("`init` does not transform input"),
  };

  Ok(output)
}

/// Write the default configuration to `output`.
///
/// # Errors
///
/// Returns an error if `output` exists and `force` is not set, or if the file
/// or its parent directory cannot be created.
pub fn init_config(output: &Path, format: &str, force: bool) -> Result<()> {
  if output.exists() && !force {
    bail!(
      "Configuration file already exists: {}. Use --force to overwrite.",
      output.display()
    );
  }

  if let Some(parent) = output.parent()
    && !parent.as_os_str().is_empty()
    && !parent.exists()
  {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create directory: {}", parent.display())
    })?;
    info!("Created directory: {}", parent.display());
  }

  Config::generate_default_config(format, output).wrap_err_with(|| {
    format!("Failed to generate configuration file: {}", output.display())
  })?;

  info!(
    "Configuration file created successfully. Edit it to point at your \
     smiley directory."
  );
  Ok(())
}
