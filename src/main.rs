mod changelog;
mod commands;
mod core;
mod manifest;
mod tracker;

use clap::{Parser, Subcommand};
use crate::core::config::ToolsConfig;
use crate::core::error::{ResultExt, ToolResult, print_error};
use crate::core::fetch::BuildPair;
use std::path::PathBuf;

/// Release-management toolbox: manifest diffing and build changelog reports
#[derive(Parser)]
#[command(name = "relmgr")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Use a specific configuration file instead of searching for relmgr.toml
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Compare the group manifests of two product revisions
  DiffManifests {
    /// The source product label, e.g. "15-SP4"
    #[arg(short = 'f', long)]
    from: String,

    /// Manifest revision in the source project (default: latest)
    #[arg(short = 'o', long = "from-rev")]
    from_rev: Option<String>,

    /// The target product label, e.g. "15-SP5"
    #[arg(short = 't', long)]
    to: String,

    /// Manifest revision in the target project (default: latest)
    #[arg(short = 'd', long = "to-rev")]
    to_rev: Option<String>,

    /// Write the report to this file instead of standard output
    #[arg(long)]
    output_file: Option<PathBuf>,
  },

  /// Derive the package and ticket-reference report for a build pair
  BuildReport {
    /// The two build numbers to compare: old then new
    #[arg(short = 'b', long = "build", num_args = 2, required = true, value_names = ["OLD", "NEW"])]
    builds: Vec<String>,

    /// Version label paired to the newer build
    #[arg(long)]
    version: Option<String>,

    /// Version label paired to the older build
    #[arg(long)]
    origin_version: Option<String>,

    /// Feed base URL override
    #[arg(short = 'a', long)]
    url: Option<String>,

    /// Fetch timeout in seconds
    #[arg(short = 'A', long)]
    timeout: Option<u64>,

    /// Output the report as JSON
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  env_logger::init();

  let cli = Cli::parse();

  if let Err(err) = run(cli) {
    print_error(&err);
    std::process::exit(err.exit_code().as_i32());
  }
}

fn run(cli: Cli) -> ToolResult<()> {
  let current_dir = std::env::current_dir().context("Failed to determine the working directory")?;
  let mut config = match &cli.config {
    Some(path) => ToolsConfig::load_from(path)?,
    None => ToolsConfig::load(&current_dir)?,
  };

  match cli.command {
    Commands::DiffManifests {
      from,
      from_rev,
      to,
      to_rev,
      output_file,
    } => commands::run_diff_manifests(
      &config,
      &from,
      from_rev.as_deref(),
      &to,
      to_rev.as_deref(),
      output_file.as_deref(),
    ),

    Commands::BuildReport {
      builds,
      version,
      origin_version,
      url,
      timeout,
      json,
    } => {
      // CLI overrides fold into the config record before the pipeline starts
      if let Some(version) = version {
        config.changelog.version_label = version;
      }
      if let Some(origin) = origin_version {
        config.changelog.origin_label = origin;
      }
      if let Some(url) = url {
        config.source.feed_url = url;
      }
      if let Some(timeout) = timeout {
        config.source.timeout_secs = timeout;
      }

      let pair = BuildPair {
        old: builds[0].clone(),
        new: builds[1].clone(),
      };
      commands::run_build_report(&config, &pair, json)
    }
  }
}
