mod checks;
mod commands;
mod core;
mod registry;
mod report;
mod utils;

use clap::{Parser, Subcommand};
use core::context::{ContextOverrides, RegistryContext};
use core::error::{RegistryError, print_error};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Validate dated release directories against the central release index
#[derive(Parser)]
#[command(name = "release-registry")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Registry root (default: current directory)
  #[arg(long, global = true)]
  root: Option<PathBuf>,

  /// Release store directory, relative to the root
  #[arg(long, global = true)]
  releases_dir: Option<PathBuf>,

  /// Index document, relative to the root
  #[arg(long, global = true)]
  index: Option<PathBuf>,

  /// Increase log verbosity (-v info, -vv debug)
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Validate one release version, or every version in the store
  Validate {
    /// Version directory to validate (default: all)
    #[arg(id = "target", value_name = "VERSION")]
    target: Option<String>,
    /// Exit with a failure status when any error is found
    #[arg(long)]
    strict: bool,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
    /// Where to write the markdown report, relative to the root
    #[arg(long, conflicts_with = "no_report")]
    report: Option<PathBuf>,
    /// Do not write the report file
    #[arg(long)]
    no_report: bool,
  },

  /// List versions registered in the index
  List {
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Resolve `latest` (or a version) to a concrete registered version
  Resolve {
    /// Version to resolve
    #[arg(id = "target", value_name = "VERSION", default_value = "latest")]
    target: String,
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
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Logs go to stderr so stdout stays clean for reports and `--json`
fn init_tracing(verbose: u8) {
  let default_level = match verbose {
    0 => "release_registry=warn",
    1 => "release_registry=info",
    _ => "release_registry=debug",
  };
  let filter = tracing_subscriber::EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

  tracing_subscriber::registry()
    .with(filter)
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let root = match cli.root {
    Some(root) => root,
    None => match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => handle_error(RegistryError::from(e).context("Failed to get current directory")),
    },
  };

  let report_override = match &cli.command {
    Commands::Validate { report, .. } => report.clone(),
    _ => None,
  };
  let overrides = ContextOverrides {
    releases_dir: cli.releases_dir,
    index_path: cli.index,
    report_path: report_override,
  };

  let ctx = match RegistryContext::build(&root, overrides) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Validate {
      target,
      strict,
      json,
      no_report,
      ..
    } => commands::run_validate(&ctx, target, strict, json, !no_report),
    Commands::List { json } => commands::run_list(&ctx, json),
    Commands::Resolve { target } => commands::run_resolve(&ctx, &target),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: RegistryError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
