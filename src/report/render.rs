//! Report rendering
//!
//! Pure functions from an aggregated result to text. The renderer knows
//! nothing about the release store and is the same for one version or all.

use super::aggregator::{Summary, ValidationResult};
use crate::checks::{Finding, Severity};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Section order in the rendered report
const SECTIONS: [(Severity, &str); 4] = [
  (Severity::Error, "### ❌ Errors"),
  (Severity::Warning, "### ⚠️ Warnings"),
  (Severity::Info, "### ℹ️ Info"),
  (Severity::Passed, "### ✅ Passed"),
];

/// Render the markdown report
///
/// Layout: timestamp header, summary (passed, errors, warnings, info), then
/// one section per non-empty bucket.
pub fn render_markdown(result: &ValidationResult, generated_at: DateTime<Utc>) -> String {
  let summary = result.summary();
  let mut lines = Vec::new();

  lines.push(format!(
    "### Validation time: {}",
    generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
  ));
  lines.push(String::new());

  lines.push("### 📊 Summary".to_string());
  lines.push(format!("- ✅ Passed: {}", summary.passed));
  lines.push(format!("- ❌ Errors: {}", summary.errors));
  lines.push(format!("- ⚠️ Warnings: {}", summary.warnings));
  lines.push(format!("- ℹ️ Info: {}", summary.info));
  lines.push(String::new());

  for (severity, heading) in SECTIONS {
    let findings = result.bucket(severity);
    if findings.is_empty() {
      continue;
    }

    lines.push(heading.to_string());
    lines.extend(findings.iter().map(format_finding));
    lines.push(String::new());
  }

  lines.join("\n")
}

fn format_finding(finding: &Finding) -> String {
  format!("- [{}] {}", finding.version, finding.message)
}

/// Machine-readable form of a report
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
  pub generated_at: String,
  pub has_blocking_errors: bool,
  pub summary: Summary,
  pub errors: &'a [Finding],
  pub warnings: &'a [Finding],
  pub info: &'a [Finding],
  pub passed: &'a [Finding],
}

/// Render the report as pretty-printed JSON
pub fn render_json(result: &ValidationResult, generated_at: DateTime<Utc>) -> Result<String, serde_json::Error> {
  let report = JsonReport {
    generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    has_blocking_errors: result.has_blocking_errors(),
    summary: result.summary(),
    errors: &result.errors,
    warnings: &result.warnings,
    info: &result.info,
    passed: &result.passed,
  };

  serde_json::to_string_pretty(&report)
}
