use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

/// Command line interface for lexpage
#[derive(Parser, Debug)]
#[command(author, version, about = "Lexpage BBcode renderer")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to a configuration file (TOML or JSON). When omitted, lexpage.toml
  /// and friends are looked up in the working directory, then in
  /// `$XDG_CONFIG_HOME/lexpage/`.
  #[arg(short = 'c', long = "config-file", global = true)]
  pub config_file: Option<PathBuf>,
}

/// All supported subcommands for the lexpage CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Render BBcode to HTML.
  Render {
    /// File to read, standard input when omitted or `-`.
    input: Option<PathBuf>,

    /// Leave smileys as typed.
    #[arg(long)]
    no_smileys: bool,
  },

  /// Strip BBcode down to plain text.
  Strip {
    /// File to read, standard input when omitted or `-`.
    input: Option<PathBuf>,
  },

  /// Replace smileys only.
  Smileys {
    /// File to read, standard input when omitted or `-`.
    input: Option<PathBuf>,
  },

  /// Initialize a new configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "lexpage.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },
}

impl Commands {
  /// Input file of a transforming subcommand.
  #[must_use]
  pub fn input(&self) -> Option<&Path> {
    match self {
      Self::Render { input, .. }
      | Self::Strip { input }
      | Self::Smileys { input } => input.as_deref(),
      Self::Init { .. } => None,
    }
  }
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
