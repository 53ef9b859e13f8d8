//! `release-registry validate`

use crate::checks::create_default_rule_set;
use crate::core::context::RegistryContext;
use crate::core::engine::{self, Target};
use crate::core::error::{ExitCode, RegistryResult, ResultExt};
use crate::report::{ValidationResult, render_json, render_markdown};
use chrono::Utc;
use std::fs;
use std::path::Path;

/// Run the validate command
///
/// The report is always produced. Only the exit status depends on `strict`.
pub fn run_validate(
  ctx: &RegistryContext,
  version: Option<String>,
  strict: bool,
  json: bool,
  write_report: bool,
) -> RegistryResult<()> {
  let rules = create_default_rule_set();
  let target = Target::from_arg(version);
  let result = engine::validate(ctx, &target, &rules)?;

  let generated_at = Utc::now();
  let markdown = render_markdown(&result, generated_at);

  let report_path = ctx.report_path();
  if write_report {
    write_report_file(&report_path, &markdown)?;
    tracing::info!(path = %report_path.display(), "report written");
  }

  if json {
    println!("{}", render_json(&result, generated_at)?);
  } else {
    println!("{}", markdown);
    print_summary(&result);
    if write_report {
      println!("📝 Report written to {}", report_path.display());
    }
  }

  if strict && result.has_blocking_errors() {
    std::process::exit(ExitCode::Validation.as_i32());
  }

  Ok(())
}

fn write_report_file(path: &Path, content: &str) -> RegistryResult<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(path, content).with_context(|| format!("Failed to write report to {}", path.display()))
}

fn print_summary(result: &ValidationResult) {
  let summary = result.summary();
  if result.has_blocking_errors() {
    println!(
      "❌ Validation failed: {} error(s), {} warning(s)",
      summary.errors, summary.warnings
    );
  } else if result.has_warnings() {
    println!("⚠️  Validation passed with {} warning(s)", summary.warnings);
  } else {
    println!("✅ All checks passed");
  }
}
