use std::io::{self, Write};

use color_eyre::eyre::{Context, Result};
use lexpage::{
  cli::{Cli, Commands},
  commands::{execute, init_config, read_input},
};
use lexpage_config::Config;
use log::LevelFilter;

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  // Logs go to stderr, the rendered text to stdout
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Auto)
    .init();

  if let Commands::Init {
    output,
    format,
    force,
  } = &cli.command
  {
    return init_config(output, format, *force);
  }

  let config = Config::load(cli.config_file.as_deref())
    .wrap_err("Failed to load configuration")?;
  let input = read_input(cli.command.input())?;
  let output = execute(&cli.command, &config, &input)?;

  let mut stdout = io::stdout().lock();
  stdout
    .write_all(output.as_bytes())
    .and_then(|()| stdout.flush())
    .wrap_err("Failed to write output")?;

  Ok(())
}
